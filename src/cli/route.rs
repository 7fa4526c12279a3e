//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_config_json, format_config_text, format_context_json, format_context_text,
    format_prompts_json, format_prompts_text, format_relations_json, format_relations_text,
    format_taxonomy_json, format_taxonomy_text, OutputFormat,
};
use crate::config::{ConfigLoader, IdeateConfig};
use crate::context::{build_context, build_extraction_context, DomainSemantics};
use crate::error::{ApiError, IdeateError};
use crate::pipeline::{load_history, PipelineMode, PromptPipeline};
use crate::schema::{classify, RawSchemaDocument};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Runtime context for CLI execution: workspace and resolved configuration.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    workspace_root: PathBuf,
    config: IdeateConfig,
}

impl RunContext {
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, IdeateError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: IdeateConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &IdeateConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, IdeateError> {
        let started = Instant::now();
        let output = match command {
            Commands::Generate {
                domain,
                schema,
                history,
                max,
                mode,
                format,
            } => self.handle_generate(
                domain,
                schema,
                history.as_deref(),
                *max,
                mode.as_deref(),
                format,
            ),
            Commands::Classify { schema, format } => self.handle_classify(schema, format),
            Commands::Context {
                schema,
                history,
                extraction,
                format,
            } => self.handle_context(schema, history.as_deref(), *extraction, format),
            Commands::Relations {
                schema,
                domain,
                format,
            } => self.handle_relations(schema, domain, format),
            Commands::ShowConfig { format } => self.handle_show_config(format),
        }?;
        info!(
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        Ok(output)
    }

    fn handle_generate(
        &self,
        domain: &str,
        schema: &Path,
        history: Option<&Path>,
        max: Option<usize>,
        mode: Option<&str>,
        format: &str,
    ) -> Result<String, IdeateError> {
        let format = OutputFormat::parse(format)?;
        let mut config = self.config.clone();
        if let Some(max) = max {
            config.generation.max_prompts = max;
        }
        if let Some(mode) = mode {
            config.generation.pipeline_mode = mode
                .parse::<PipelineMode>()
                .map_err(ApiError::ConfigError)?;
        }
        validate(&config)?;

        let pipeline = PromptPipeline::from_config(&config)?;
        let results = block_on(pipeline.generate_prompts(domain, schema, history))??;

        Ok(match format {
            OutputFormat::Text => format_prompts_text(domain, &results),
            OutputFormat::Json => format_prompts_json(&results),
        })
    }

    fn handle_classify(&self, schema: &Path, format: &str) -> Result<String, IdeateError> {
        let format = OutputFormat::parse(format)?;
        let pair = classify(&RawSchemaDocument::from_path(schema)?);
        Ok(match format {
            OutputFormat::Text => format_taxonomy_text(&pair),
            OutputFormat::Json => format_taxonomy_json(&pair),
        })
    }

    fn handle_context(
        &self,
        schema: &Path,
        history: Option<&Path>,
        extraction: bool,
        format: &str,
    ) -> Result<String, IdeateError> {
        let format = OutputFormat::parse(format)?;
        let pair = classify(&RawSchemaDocument::from_path(schema)?);
        let semantics = self
            .config
            .generation
            .semantics
            .as_deref()
            .map(DomainSemantics::new)
            .unwrap_or_default();

        let context = if extraction {
            build_extraction_context(&pair, &semantics)
        } else {
            let history = history.map(load_history).transpose()?;
            build_context(&pair, &semantics, history.as_ref())
        };

        Ok(match format {
            OutputFormat::Text => format_context_text(&context),
            OutputFormat::Json => format_context_json(&context),
        })
    }

    fn handle_relations(
        &self,
        schema: &Path,
        domain: &str,
        format: &str,
    ) -> Result<String, IdeateError> {
        let format = OutputFormat::parse(format)?;
        validate(&self.config)?;
        let pipeline = PromptPipeline::from_config(&self.config)?;
        let relations = block_on(pipeline.label_relations(domain, schema))??;
        Ok(match format {
            OutputFormat::Text => format_relations_text(&relations),
            OutputFormat::Json => format_relations_json(&relations),
        })
    }

    fn handle_show_config(&self, format: &str) -> Result<String, IdeateError> {
        Ok(match OutputFormat::parse(format)? {
            OutputFormat::Text => format_config_text(&self.config),
            OutputFormat::Json => format_config_json(&self.config),
        })
    }
}

fn validate(config: &IdeateConfig) -> Result<(), ApiError> {
    config.validate().map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        ApiError::ConfigError(format!(
            "Configuration validation failed:\n{}",
            messages.join("\n")
        ))
    })
}

fn block_on<F: Future>(future: F) -> Result<F::Output, ApiError> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| ApiError::ProviderError(format!("Failed to create runtime: {}", e)))?;
    Ok(rt.block_on(future))
}
