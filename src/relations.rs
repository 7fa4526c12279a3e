//! Relationship labelling for declared entity relations.
//!
//! Each `entityRelations` pair is sent to the generator in one request; the
//! reply is expected to hold a bracketed list with one upper-case verb per
//! pair, in pair order.

use crate::context::{render_taxonomy_passage, ContextSet};
use crate::error::GenerationError;
use crate::generation::{EntityPair, Orchestrator, TaskQuestion};
use crate::schema::{RawSchemaDocument, TaxonomyPair};
use serde::Serialize;
use tracing::{debug, info, warn};

const ENTITY_RELATIONS_PREFIX: &str = "ENTITY_RELATIONS = ";

/// An entity pair and the label the generator gave it, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledRelation {
    #[serde(rename = "lhsEntityName")]
    pub lhs: String,
    #[serde(rename = "rhsEntityName")]
    pub rhs: String,
    pub relation: Option<String>,
}

/// Declared relations with both entity names present, in document order.
pub fn entity_pairs(schema: &RawSchemaDocument) -> Vec<EntityPair> {
    schema
        .entity_relations
        .iter()
        .filter_map(|relation| {
            match (
                relation.lhs_entity_name.as_deref(),
                relation.rhs_entity_name.as_deref(),
            ) {
                (Some(lhs), Some(rhs)) => Some(EntityPair {
                    lhs: lhs.to_string(),
                    rhs: rhs.to_string(),
                }),
                _ => {
                    debug!("Relation with a missing entity name skipped");
                    None
                }
            }
        })
        .collect()
}

/// Taxonomy passage followed by the relation list.
pub fn build_relation_context(pair: &TaxonomyPair, pairs: &[EntityPair]) -> ContextSet {
    let relations = serde_json::to_string(pairs).unwrap_or_else(|_| "[]".to_string());
    ContextSet::from_texts([
        render_taxonomy_passage(pair),
        format!("{}{}\n", ENTITY_RELATIONS_PREFIX, relations),
    ])
}

/// Labels from the first `[...]` span of `raw`.
///
/// The span is read as a JSON string array; if that fails it is split on
/// commas with quotes and whitespace removed from each item. Empty items are
/// dropped. A reply with no bracketed span yields no labels.
pub fn parse_relation_reply(raw: &str) -> Vec<String> {
    let Some(start) = raw.find('[') else {
        return Vec::new();
    };
    let Some(len) = raw[start..].find(']') else {
        return Vec::new();
    };
    let span = &raw[start..=start + len];

    if let Ok(labels) = serde_json::from_str::<Vec<String>>(span) {
        return labels
            .into_iter()
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect();
    }

    span[1..span.len() - 1]
        .split(',')
        .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Zip labels onto pairs in order. Surplus labels are ignored; pairs beyond
/// the last label stay unlabelled.
pub fn label_relations(pairs: &[EntityPair], labels: Vec<String>) -> Vec<LabeledRelation> {
    let mut labels = labels.into_iter();
    pairs
        .iter()
        .map(|pair| LabeledRelation {
            lhs: pair.lhs.clone(),
            rhs: pair.rhs.clone(),
            relation: labels.next(),
        })
        .collect()
}

/// Ask the generator to label every declared relation of `schema`.
/// A schema without relations makes no generator call.
pub async fn label_schema_relations(
    orchestrator: &Orchestrator,
    domain: &str,
    schema: &RawSchemaDocument,
    taxonomies: &TaxonomyPair,
) -> Result<Vec<LabeledRelation>, GenerationError> {
    let pairs = entity_pairs(schema);
    if pairs.is_empty() {
        info!("Schema declares no entity relations");
        return Ok(Vec::new());
    }

    let context = build_relation_context(taxonomies, &pairs);
    let question = TaskQuestion::RelationLabeling {
        pairs: pairs.clone(),
    };
    let reply = orchestrator.generate(domain, &context, &question, None).await?;

    let labels = parse_relation_reply(&reply);
    if labels.len() != pairs.len() {
        warn!(
            pairs = pairs.len(),
            labels = labels.len(),
            "Relation label count does not match pair count"
        );
    }
    Ok(label_relations(&pairs, labels))
}
