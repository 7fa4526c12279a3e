//! Validated output records.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Default upper bound on the number of prompts returned.
pub const DEFAULT_MAX_PROMPTS: usize = 10;

/// One validated prompt and the attributes it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptRecord {
    prompt: String,
    attributes: BTreeSet<String>,
}

impl PromptRecord {
    /// `None` when the trimmed prompt text is empty.
    pub fn new<I, S>(prompt: impl Into<String>, attributes: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prompt = prompt.into();
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return None;
        }
        Some(Self {
            prompt: prompt.to_string(),
            attributes: attributes.into_iter().map(Into::into).collect(),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Referenced attributes. Treat as a set; iteration order is not a contract.
    pub fn attributes(&self) -> &BTreeSet<String> {
        &self.attributes
    }

    pub fn references(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }
}

/// At most `capacity` records, in emission order, with unique prompt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<PromptRecord>,
    #[serde(skip)]
    capacity: usize,
}

impl ResultSet {
    pub fn empty(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity,
        }
    }

    /// Keep records in order, dropping repeated prompt text (first wins) and
    /// anything beyond `capacity`.
    pub fn from_records<I>(capacity: usize, records: I) -> Self
    where
        I: IntoIterator<Item = PromptRecord>,
    {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        for record in records {
            if kept.len() == capacity {
                break;
            }
            if seen.insert(record.prompt.clone()) {
                kept.push(record);
            }
        }
        Self {
            records: kept,
            capacity,
        }
    }

    pub fn records(&self) -> &[PromptRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PromptRecord> {
        self.records.iter()
    }

    pub fn prompts(&self) -> Vec<&str> {
        self.records.iter().map(PromptRecord::prompt).collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<PromptRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a PromptRecord;
    type IntoIter = std::slice::Iter<'a, PromptRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
