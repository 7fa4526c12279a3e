//! Property-based tests for determinism guarantees

use ideate::context::{build_context, parse_taxonomy_passage, render_taxonomy_passage, DomainSemantics};
use ideate::schema::{classify, RawAttribute, RawEntity, RawSchemaDocument};
use proptest::prelude::*;

const LOGICAL_TYPES: &[&str] = &[
    "CONTINUOUS",
    "CATEGORICAL",
    "ORDERED",
    "BOOLEAN",
    "DATABASE_ID",
    "GENERIC_STRING",
    "TIMEZONE",
    "TIMESTAMP",
    "GEOGRAPHY",
    "continuous",
];

const ROLES: &[&str] = &["Fact", "Dimension", "Bridge", "fact"];

fn attribute() -> impl Strategy<Value = RawAttribute> {
    (
        prop::option::of(prop::sample::select(LOGICAL_TYPES)),
        prop::option::of("[a-z_]{1,8}"),
    )
        .prop_map(|(tag, name)| RawAttribute {
            logical_data_type: tag.map(str::to_string),
            canonical_name: name,
        })
}

fn entity() -> impl Strategy<Value = RawEntity> {
    (
        prop::option::of(prop::sample::select(ROLES)),
        prop::option::of("[a-z_]{1,8}"),
        prop::collection::vec(attribute(), 0..6),
    )
        .prop_map(|(role, name, attributes)| RawEntity {
            entity_type: role.map(str::to_string),
            canonical_name: name,
            attribute_list: attributes,
        })
}

fn schema() -> impl Strategy<Value = RawSchemaDocument> {
    prop::collection::vec(entity(), 0..6).prop_map(|entities| RawSchemaDocument {
        entity_list: entities,
        entity_relations: Vec::new(),
    })
}

/// Classification and passage rendering are pure functions of the document.
#[test]
fn test_classification_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&schema(), |doc| {
            let first = classify(&doc);
            let second = classify(&doc);
            assert_eq!(first, second);

            let semantics = DomainSemantics::default();
            let a = build_context(&first, &semantics, None);
            let b = build_context(&second, &semantics, None);
            assert_eq!(a, b);
            assert_eq!(a.fingerprint(), b.fingerprint());

            Ok(())
        })
        .unwrap();
}

/// Each attribute name lands in exactly one category.
#[test]
fn test_attribute_partition_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&schema(), |doc| {
            let pair = classify(&doc);
            let mut seen = std::collections::HashSet::new();
            for (_, names) in pair.attributes.iter() {
                for name in names {
                    assert!(seen.insert(name.clone()), "{} listed twice", name);
                }
            }
            assert_eq!(seen.len(), pair.attributes.len());
            Ok(())
        })
        .unwrap();
}

/// Rendering the taxonomy passage and reading it back is lossless.
#[test]
fn test_taxonomy_passage_round_trip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&schema(), |doc| {
            let pair = classify(&doc);
            let parsed = parse_taxonomy_passage(&render_taxonomy_passage(&pair));
            assert_eq!(parsed, Some(pair));
            Ok(())
        })
        .unwrap();
}
