//! Taxonomy and relation presentation.

use super::shared::{format_section_heading, to_pretty_json};
use crate::relations::LabeledRelation;
use crate::schema::TaxonomyPair;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

pub fn format_taxonomy_text(pair: &TaxonomyPair) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Attribute types"));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Category", "Count", "Attributes"]);
    for (category, names) in pair.attributes.iter() {
        table.add_row(vec![
            category.label().to_string(),
            names.len().to_string(),
            names.join(", "),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));

    out.push_str(&format!("{}\n\n", format_section_heading("Entity types")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Role", "Count", "Entities"]);
    for (role, names) in pair.entities.iter() {
        table.add_row(vec![
            role.label().to_string(),
            names.len().to_string(),
            names.join(", "),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

/// `{"ATTRIBUTE_TYPES": {...}, "ENTITY_TYPES": {...}}`
pub fn format_taxonomy_json(pair: &TaxonomyPair) -> String {
    to_pretty_json(&serde_json::json!({
        "ATTRIBUTE_TYPES": pair.attributes,
        "ENTITY_TYPES": pair.entities,
    }))
}

pub fn format_relations_text(relations: &[LabeledRelation]) -> String {
    if relations.is_empty() {
        return "Schema declares no entity relations.".to_string();
    }
    let mut out = format!("{}\n\n", format_section_heading("Entity relations"));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["From", "Relation", "To"]);
    for relation in relations {
        table.add_row(vec![
            relation.lhs.clone(),
            relation.relation.clone().unwrap_or_else(|| "?".to_string()),
            relation.rhs.clone(),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

pub fn format_relations_json(relations: &[LabeledRelation]) -> String {
    to_pretty_json(&relations)
}
