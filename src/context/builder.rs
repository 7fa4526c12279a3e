//! Grounding context builder.
//!
//! Passages are produced in a fixed order and serialized deterministically:
//! the same taxonomy, semantics and history always yield byte-identical text.

use crate::context::passage::ContextSet;
use crate::context::semantics::DomainSemantics;
use crate::schema::{AttributeCategory, AttributeTaxonomy, EntityRole, EntityTaxonomy, TaxonomyPair};
use serde::Serialize;
use serde_json::Value;

const ATTRIBUTE_TYPES_PREFIX: &str = "ATTRIBUTE_TYPES = ";
const ENTITY_TYPES_PREFIX: &str = "ENTITY_TYPES = ";
const HISTORY_HEADER: &str = "Previous Search History:";

const EXTRACTION_EXAMPLES: &str = "\
Example 1 Input: \"actual call volume by queue names last month\", Output: (\"acv\", \"queueid\", \"month_of_year\")
Example 2 Input: \"what is the average shrinkage over the last 2 weeks by category names\", Output: (\"shrinkage\", \"shrinkage_total\", \"category_name\")";

/// Passages for the ideation request: taxonomy, semantics, then history when
/// supplied. A missing history produces no passage at all.
pub fn build_context(
    pair: &TaxonomyPair,
    semantics: &DomainSemantics,
    history: Option<&Value>,
) -> ContextSet {
    let mut texts = vec![render_taxonomy_passage(pair), semantics.render(pair)];
    if let Some(history) = history {
        texts.push(render_history_passage(history));
    }
    ContextSet::from_texts(texts)
}

/// Passages for the attribute-extraction request: taxonomy, semantics, then
/// worked input/output examples.
pub fn build_extraction_context(pair: &TaxonomyPair, semantics: &DomainSemantics) -> ContextSet {
    ContextSet::from_texts([
        render_taxonomy_passage(pair),
        semantics.render(pair),
        EXTRACTION_EXAMPLES.to_string(),
    ])
}

pub fn render_taxonomy_passage(pair: &TaxonomyPair) -> String {
    format!(
        "{}{}\n\n{}{}\n",
        ATTRIBUTE_TYPES_PREFIX,
        compact_json(&pair.attributes),
        ENTITY_TYPES_PREFIX,
        compact_json(&pair.entities),
    )
}

pub fn render_history_passage(history: &Value) -> String {
    format!("{}\n{}\n", HISTORY_HEADER, pretty_json(history))
}

/// Recover the taxonomies from a rendered taxonomy passage. Returns `None`
/// when either line is missing or is not a label -> string-list mapping
/// over the closed vocabulary.
pub fn parse_taxonomy_passage(text: &str) -> Option<TaxonomyPair> {
    let mut attributes = None;
    let mut entities = None;

    for line in text.lines() {
        if let Some(body) = line.strip_prefix(ATTRIBUTE_TYPES_PREFIX) {
            attributes = Some(parse_attribute_map(body)?);
        } else if let Some(body) = line.strip_prefix(ENTITY_TYPES_PREFIX) {
            entities = Some(parse_entity_map(body)?);
        }
    }

    Some(TaxonomyPair {
        attributes: attributes?,
        entities: entities?,
    })
}

fn parse_attribute_map(body: &str) -> Option<AttributeTaxonomy> {
    let map: serde_json::Map<String, Value> = serde_json::from_str(body).ok()?;
    let mut taxonomy = AttributeTaxonomy::new();
    for (label, names) in map {
        let category = AttributeCategory::from_label(&label)?;
        for name in string_list(names)? {
            taxonomy.insert(category, name);
        }
    }
    Some(taxonomy)
}

fn parse_entity_map(body: &str) -> Option<EntityTaxonomy> {
    let map: serde_json::Map<String, Value> = serde_json::from_str(body).ok()?;
    let mut taxonomy = EntityTaxonomy::new();
    for (label, names) in map {
        let role = EntityRole::from_tag(&label)?;
        for name in string_list(names)? {
            taxonomy.push(role, name);
        }
    }
    Some(taxonomy)
}

fn string_list(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

fn compact_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

fn pretty_json(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => value.to_string(),
    }
}
