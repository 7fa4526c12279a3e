//! Closed taxonomies produced by schema classification.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Logical-type category of an attribute. Declaration order is the
/// iteration and rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeCategory {
    Continuous,
    Categorical,
    Ordered,
    Boolean,
    DatabaseID,
    GenericString,
    Timezone,
    Timestamp,
}

impl AttributeCategory {
    pub const ALL: [AttributeCategory; 8] = [
        AttributeCategory::Continuous,
        AttributeCategory::Categorical,
        AttributeCategory::Ordered,
        AttributeCategory::Boolean,
        AttributeCategory::DatabaseID,
        AttributeCategory::GenericString,
        AttributeCategory::Timezone,
        AttributeCategory::Timestamp,
    ];

    /// Map a schema `logicalDataType` tag. Matching is exact.
    pub fn from_logical_type(tag: &str) -> Option<Self> {
        match tag {
            "CONTINUOUS" => Some(AttributeCategory::Continuous),
            "CATEGORICAL" => Some(AttributeCategory::Categorical),
            "ORDERED" => Some(AttributeCategory::Ordered),
            "BOOLEAN" => Some(AttributeCategory::Boolean),
            "DATABASE_ID" => Some(AttributeCategory::DatabaseID),
            "GENERIC_STRING" => Some(AttributeCategory::GenericString),
            "TIMEZONE" => Some(AttributeCategory::Timezone),
            "TIMESTAMP" => Some(AttributeCategory::Timestamp),
            _ => None,
        }
    }

    /// Human-facing label used in context passages.
    pub fn label(self) -> &'static str {
        match self {
            AttributeCategory::Continuous => "Continuous",
            AttributeCategory::Categorical => "Categorical",
            AttributeCategory::Ordered => "Ordered",
            AttributeCategory::Boolean => "Boolean",
            AttributeCategory::DatabaseID => "Database ID",
            AttributeCategory::GenericString => "Generic string",
            AttributeCategory::Timezone => "Timezone",
            AttributeCategory::Timestamp => "Timestamp",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for AttributeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Analytic role of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityRole {
    Fact,
    Dimension,
}

impl EntityRole {
    pub const ALL: [EntityRole; 2] = [EntityRole::Fact, EntityRole::Dimension];

    /// Map a schema `entityType` tag. Case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Fact" => Some(EntityRole::Fact),
            "Dimension" => Some(EntityRole::Dimension),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityRole::Fact => "Fact",
            EntityRole::Dimension => "Dimension",
        }
    }
}

impl fmt::Display for EntityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category -> ordered attribute names. A name lives in at most one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTaxonomy {
    entries: BTreeMap<AttributeCategory, Vec<String>>,
    index: HashMap<String, AttributeCategory>,
}

impl Default for AttributeTaxonomy {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeTaxonomy {
    pub fn new() -> Self {
        Self {
            entries: AttributeCategory::ALL
                .into_iter()
                .map(|c| (c, Vec::new()))
                .collect(),
            index: HashMap::new(),
        }
    }

    /// Insert `name` under `category` unless it is already classified.
    /// Returns false when the name was already present (first wins).
    pub fn insert(&mut self, category: AttributeCategory, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), category);
        self.entries.entry(category).or_default().push(name);
        true
    }

    pub fn get(&self, category: AttributeCategory) -> &[String] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn category_of(&self, name: &str) -> Option<AttributeCategory> {
        self.index.get(name).copied()
    }

    /// Categories in declaration order, each with its names.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeCategory, &[String])> {
        self.entries.iter().map(|(c, names)| (*c, names.as_slice()))
    }

    /// Every classified name, category by category.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().flatten().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl FromIterator<(AttributeCategory, String)> for AttributeTaxonomy {
    fn from_iter<T: IntoIterator<Item = (AttributeCategory, String)>>(iter: T) -> Self {
        let mut taxonomy = Self::new();
        for (category, name) in iter {
            taxonomy.insert(category, name);
        }
        taxonomy
    }
}

/// Serialized as an ordered `label -> [names]` map covering every category.
impl Serialize for AttributeTaxonomy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, names) in self.iter() {
            map.serialize_entry(category.label(), names)?;
        }
        map.end()
    }
}

/// Role -> ordered entity names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTaxonomy {
    entries: BTreeMap<EntityRole, Vec<String>>,
}

impl Default for EntityTaxonomy {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityTaxonomy {
    pub fn new() -> Self {
        Self {
            entries: EntityRole::ALL.into_iter().map(|r| (r, Vec::new())).collect(),
        }
    }

    pub fn push(&mut self, role: EntityRole, name: impl Into<String>) {
        self.entries.entry(role).or_default().push(name.into());
    }

    pub fn get(&self, role: EntityRole) -> &[String] {
        self.entries
            .get(&role)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityRole, &[String])> {
        self.entries.iter().map(|(r, names)| (*r, names.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for EntityTaxonomy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (role, names) in self.iter() {
            map.serialize_entry(role.label(), names)?;
        }
        map.end()
    }
}

/// Both taxonomies derived from one schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaxonomyPair {
    pub attributes: AttributeTaxonomy,
    pub entities: EntityTaxonomy,
}
