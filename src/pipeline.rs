//! Prompt pipeline: schema -> taxonomies -> grounding context -> generation
//! -> validated prompt records.
//!
//! Each call is independent. Classification, context building and parsing are
//! synchronous; the only suspension points are the generator calls.

use crate::config::IdeateConfig;
use crate::context::{build_context, build_extraction_context, DomainSemantics};
use crate::error::{IdeateError, SchemaParseError};
use crate::generation::{Orchestrator, ProviderGenerator, TaskQuestion};
use crate::provider::ProviderFactory;
use crate::relations::{label_schema_relations, LabeledRelation};
use crate::reply::{
    annotate, parse_attribute_reply, parse_ideation_reply, restrict_to_taxonomy, ResultSet,
    DEFAULT_MAX_PROMPTS,
};
use crate::schema::{classify, RawSchemaDocument, TaxonomyPair};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How attributes are attached to generated prompts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// Case-insensitive substring match against the attribute taxonomy.
    #[default]
    Substring,
    /// A second generator call names the attributes of each prompt.
    Delegated,
}

impl PipelineMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineMode::Substring => "substring",
            PipelineMode::Delegated => "delegated",
        }
    }
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipelineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "substring" => Ok(PipelineMode::Substring),
            "delegated" => Ok(PipelineMode::Delegated),
            _ => Err(format!(
                "Invalid pipeline mode: {} (must be 'substring' or 'delegated')",
                s
            )),
        }
    }
}

/// Read a search-history document. Any JSON value is accepted.
pub fn load_history(path: &Path) -> Result<Value, SchemaParseError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SchemaParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SchemaParseError::MalformedHistory {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Clone)]
pub struct PromptPipeline {
    orchestrator: Orchestrator,
    semantics: DomainSemantics,
    max_prompts: usize,
    mode: PipelineMode,
}

impl PromptPipeline {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            semantics: DomainSemantics::default(),
            max_prompts: DEFAULT_MAX_PROMPTS,
            mode: PipelineMode::default(),
        }
    }

    /// Build the provider client and orchestrator described by `config`.
    /// Credentials are resolved from the environment here.
    pub fn from_config(config: &IdeateConfig) -> Result<Self, IdeateError> {
        let timeout = config.generation.timeout();
        let client = ProviderFactory::from_config(&config.provider, timeout)?;
        let generator = ProviderGenerator::new(client, config.provider.default_options.clone());
        info!(
            provider = generator.provider_name(),
            model = generator.model_name(),
            timeout_secs = config.generation.timeout_secs,
            mode = %config.generation.pipeline_mode,
            "Prompt pipeline configured"
        );

        let mut pipeline = Self::new(Orchestrator::with_timeout(Arc::new(generator), timeout))
            .with_max_prompts(config.generation.max_prompts)
            .with_mode(config.generation.pipeline_mode);
        if let Some(guidance) = &config.generation.semantics {
            pipeline = pipeline.with_semantics(DomainSemantics::new(guidance.clone()));
        }
        Ok(pipeline)
    }

    pub fn with_semantics(mut self, semantics: DomainSemantics) -> Self {
        self.semantics = semantics;
        self
    }

    pub fn with_max_prompts(mut self, max_prompts: usize) -> Self {
        self.max_prompts = max_prompts;
        self
    }

    pub fn with_mode(mut self, mode: PipelineMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn max_prompts(&self) -> usize {
        self.max_prompts
    }

    pub fn mode(&self) -> PipelineMode {
        self.mode
    }

    pub fn semantics(&self) -> &DomainSemantics {
        &self.semantics
    }

    /// Load the schema (and history, when given) from disk and generate up to
    /// `max_prompts` annotated prompts for `domain`.
    pub async fn generate_prompts(
        &self,
        domain: &str,
        schema_path: &Path,
        history_path: Option<&Path>,
    ) -> Result<ResultSet, IdeateError> {
        let schema = RawSchemaDocument::from_path(schema_path)?;
        let history = history_path.map(load_history).transpose()?;
        self.generate_from_document(domain, &schema, history.as_ref())
            .await
    }

    pub async fn generate_from_document(
        &self,
        domain: &str,
        schema: &RawSchemaDocument,
        history: Option<&Value>,
    ) -> Result<ResultSet, IdeateError> {
        let taxonomies = classify(schema);
        self.generate_from_taxonomies(domain, &taxonomies, history)
            .await
    }

    pub async fn generate_from_taxonomies(
        &self,
        domain: &str,
        taxonomies: &TaxonomyPair,
        history: Option<&Value>,
    ) -> Result<ResultSet, IdeateError> {
        let context = build_context(taxonomies, &self.semantics, history);
        let question = TaskQuestion::ideation(domain, self.max_prompts);
        let reply = self
            .orchestrator
            .generate(domain, &context, &question, history)
            .await?;

        let candidates = parse_ideation_reply(&reply, self.max_prompts);
        if candidates.is_empty() {
            warn!(domain, reply_chars = reply.len(), "Reply contained no numbered prompts");
            return Ok(ResultSet::empty(self.max_prompts));
        }
        debug!(domain, candidates = candidates.len(), "Parsed prompt candidates");

        let results = match self.mode {
            PipelineMode::Substring => {
                annotate(&candidates, &taxonomies.attributes, self.max_prompts)
            }
            PipelineMode::Delegated => {
                self.extract_attributes(domain, taxonomies, candidates)
                    .await?
            }
        };

        info!(domain, prompts = results.len(), mode = %self.mode, "Prompts generated");
        Ok(results)
    }

    async fn extract_attributes(
        &self,
        domain: &str,
        taxonomies: &TaxonomyPair,
        prompts: Vec<String>,
    ) -> Result<ResultSet, IdeateError> {
        let context = build_extraction_context(taxonomies, &self.semantics);
        let question = TaskQuestion::AttributeExtraction {
            prompts,
            taxonomy: taxonomies.attributes.clone(),
        };
        let reply = self
            .orchestrator
            .generate(domain, &context, &question, None)
            .await?;

        let results = restrict_to_taxonomy(
            parse_attribute_reply(&reply, self.max_prompts),
            &taxonomies.attributes,
        );
        if results.is_empty() {
            warn!(domain, "Attribute reply contained no Prompt/Attributes pairs");
        }
        Ok(results)
    }

    /// Label every declared entity relation of the schema at `schema_path`.
    pub async fn label_relations(
        &self,
        domain: &str,
        schema_path: &Path,
    ) -> Result<Vec<LabeledRelation>, IdeateError> {
        let schema = RawSchemaDocument::from_path(schema_path)?;
        let taxonomies = classify(&schema);
        Ok(label_schema_relations(&self.orchestrator, domain, &schema, &taxonomies).await?)
    }
}
