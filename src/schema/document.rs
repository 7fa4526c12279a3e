//! Raw schema document as uploaded by the caller.
//!
//! Only the fields the classifier reads are modelled; unknown fields are
//! ignored and missing or null fields default to absent/empty.

use crate::error::SchemaParseError;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Data-model description: entities with their attributes and relations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchemaDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entity_list: Vec<RawEntity>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub entity_relations: Vec<RawEntityRelation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntity {
    #[serde(default)]
    pub entity_type: Option<String>,

    #[serde(default)]
    pub canonical_name: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub attribute_list: Vec<RawAttribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttribute {
    #[serde(default)]
    pub logical_data_type: Option<String>,

    #[serde(default)]
    pub canonical_name: Option<String>,
}

/// A declared link between two entities (left-hand side to right-hand side).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntityRelation {
    #[serde(default)]
    pub lhs_entity_name: Option<String>,

    #[serde(default)]
    pub rhs_entity_name: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl RawSchemaDocument {
    pub fn from_json_str(raw: &str) -> Result<Self, SchemaParseError> {
        serde_json::from_str(raw).map_err(SchemaParseError::Malformed)
    }

    /// Read and parse a schema document from disk.
    pub fn from_path(path: &Path) -> Result<Self, SchemaParseError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SchemaParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn attribute_count(&self) -> usize {
        self.entity_list.iter().map(|e| e.attribute_list.len()).sum()
    }
}
