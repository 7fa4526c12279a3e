//! Integration tests for schema classification and context passages

use ideate::context::{build_context, parse_taxonomy_passage, render_taxonomy_passage, DomainSemantics};
use ideate::schema::{classify, AttributeCategory, EntityRole, RawSchemaDocument};
use tempfile::TempDir;

use crate::integration::test_utils::{write_file, CONTACT_CENTER_SCHEMA, SEARCH_HISTORY};

fn contact_center() -> RawSchemaDocument {
    RawSchemaDocument::from_json_str(CONTACT_CENTER_SCHEMA).unwrap()
}

#[test]
fn test_fixture_classification() {
    let pair = classify(&contact_center());

    assert_eq!(pair.entities.get(EntityRole::Fact), ["calls"]);
    assert_eq!(pair.entities.get(EntityRole::Dimension), ["queue"]);
    assert_eq!(pair.entities.len(), 2);

    assert_eq!(pair.attributes.get(AttributeCategory::Continuous), ["acv", "aht"]);
    assert_eq!(pair.attributes.get(AttributeCategory::DatabaseID), ["queueid"]);
    assert_eq!(pair.attributes.get(AttributeCategory::Timestamp), ["call_time"]);
    assert_eq!(pair.attributes.get(AttributeCategory::Ordered), ["priority"]);
    assert_eq!(pair.attributes.get(AttributeCategory::Boolean), ["is_primary"]);
    assert_eq!(pair.attributes.len(), 7);
}

#[test]
fn test_every_attribute_in_exactly_one_category() {
    let pair = classify(&contact_center());
    let total: usize = pair.attributes.iter().map(|(_, names)| names.len()).sum();
    assert_eq!(total, pair.attributes.len());
    for name in pair.attributes.names() {
        let category = pair.attributes.category_of(name).unwrap();
        assert!(pair.attributes.get(category).iter().any(|n| n == name));
    }
}

#[test]
fn test_schema_from_path_matches_from_str() {
    let temp = TempDir::new().unwrap();
    let path = write_file(temp.path(), "schema.json", CONTACT_CENTER_SCHEMA);
    assert_eq!(RawSchemaDocument::from_path(&path).unwrap(), contact_center());
}

#[test]
fn test_passages_are_byte_identical_across_runs() {
    let history: serde_json::Value = serde_json::from_str(SEARCH_HISTORY).unwrap();
    let semantics = DomainSemantics::default();

    let first = build_context(&classify(&contact_center()), &semantics, Some(&history));
    let second = build_context(&classify(&contact_center()), &semantics, Some(&history));

    assert_eq!(first, second);
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn test_history_passage_keeps_key_order() {
    let history: serde_json::Value =
        serde_json::from_str(r#"{"zeta": 1, "alpha": {"b": 2, "a": 1}}"#).unwrap();
    let context = build_context(
        &classify(&contact_center()),
        &DomainSemantics::default(),
        Some(&history),
    );
    let text = context.passages()[2].text();
    assert!(text.find("zeta").unwrap() < text.find("alpha").unwrap());
    assert!(text.find("\"b\"").unwrap() < text.find("\"a\"").unwrap());
}

#[test]
fn test_taxonomy_passage_round_trip() {
    let pair = classify(&contact_center());
    let passage = render_taxonomy_passage(&pair);
    assert_eq!(parse_taxonomy_passage(&passage).unwrap(), pair);
}

#[test]
fn test_empty_schema_still_yields_context() {
    let pair = classify(&RawSchemaDocument::from_json_str("{}").unwrap());
    assert!(pair.attributes.is_empty());
    assert!(pair.entities.is_empty());

    let context = build_context(&pair, &DomainSemantics::default(), None);
    assert_eq!(context.len(), 2);
    assert!(context.passages()[0].text().contains("\"Continuous\":[]"));
}
