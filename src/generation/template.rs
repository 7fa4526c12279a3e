//! Task question templates. Exactly one template is active per request.

use crate::schema::AttributeTaxonomy;
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// Answer format the attribute-extraction reply must follow.
pub const ATTRIBUTE_ANSWER_FORMAT: &str =
    "Answer in the format:\nPrompt: <prompt>\nAttributes: <comma-separated list of attributes>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Ideation,
    AttributeExtraction,
    RelationLabeling,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskKind::Ideation => "ideation",
            TaskKind::AttributeExtraction => "attribute_extraction",
            TaskKind::RelationLabeling => "relation_labeling",
        })
    }
}

/// One entity pair whose relationship should be named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityPair {
    #[serde(rename = "lhsEntityName")]
    pub lhs: String,
    #[serde(rename = "rhsEntityName")]
    pub rhs: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskQuestion {
    /// Suggest `count` search prompts for `domain` data.
    Ideation { domain: String, count: usize },
    /// Identify which attributes each prompt references.
    AttributeExtraction {
        prompts: Vec<String>,
        taxonomy: AttributeTaxonomy,
    },
    /// Name the relationship for each entity pair with a single word.
    RelationLabeling { pairs: Vec<EntityPair> },
}

impl TaskQuestion {
    pub fn ideation(domain: impl Into<String>, count: usize) -> Self {
        TaskQuestion::Ideation {
            domain: domain.into(),
            count,
        }
    }

    pub fn kind(&self) -> TaskKind {
        match self {
            TaskQuestion::Ideation { .. } => TaskKind::Ideation,
            TaskQuestion::AttributeExtraction { .. } => TaskKind::AttributeExtraction,
            TaskQuestion::RelationLabeling { .. } => TaskKind::RelationLabeling,
        }
    }

    /// Opening instruction placed before the documents.
    pub fn preamble(&self) -> &'static str {
        match self {
            TaskQuestion::Ideation { .. } => {
                "Given these documents, the example schema, and the search history, answer the question.\nNOTE: The data in the schema is sample data only for your reference."
            }
            TaskQuestion::AttributeExtraction { .. } => {
                "Given the following prompts, attribute types and input-output examples, answer the question."
            }
            TaskQuestion::RelationLabeling { .. } => "Given these documents, answer the question.",
        }
    }

    pub fn render(&self) -> String {
        match self {
            TaskQuestion::Ideation { domain, count } => format!(
                "Based on {} data suggest {} simple natural language search prompts to get meaningful insights from the data. Use the search history file added as examples. Ignore all cached data",
                domain, count
            ),
            TaskQuestion::AttributeExtraction { prompts, taxonomy } => {
                let payload = json!({
                    "prompts": prompts,
                    "attribute_types": taxonomy,
                });
                format!(
                    "Identify the attributes being referenced in each prompt for the below prompts and attribute types:\n{}\n{}",
                    payload, ATTRIBUTE_ANSWER_FORMAT
                )
            }
            TaskQuestion::RelationLabeling { pairs } => format!(
                "You are an expert in analysing relationships between different entities. \
Based on the provided list of entities and attributes, return an ordered JSON array of relations \
where the Nth element is the relationship between the Nth pair of entities in: {}. \
Each relationship should be a single upper-case word. For example, for the pair \
customer -> product the relation is \"BUYS\" (Customer-BUYS->Product), so you return [\"BUYS\"]. \
Return only the array and close all brackets and quotes.",
                serde_json::to_string(pairs).unwrap_or_else(|_| "[]".to_string())
            ),
        }
    }
}
