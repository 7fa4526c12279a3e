//! Property-based tests for reply parser bounds

use ideate::reply::{annotate, parse_attribute_reply, parse_ideation_reply};
use ideate::schema::{AttributeCategory, AttributeTaxonomy};
use proptest::prelude::*;

/// Lines that are sometimes numbered, sometimes bulleted, sometimes blank.
fn reply_line() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..200, "[ a-zA-Z\"]{0,24}").prop_map(|(n, text)| format!("{}. {}", n, text)),
        "[ a-zA-Z0-9.\"-]{0,30}",
        Just(String::new()),
        "(Prompt|Attributes): [ a-z,]{0,20}",
    ]
}

fn reply() -> impl Strategy<Value = String> {
    prop::collection::vec(reply_line(), 0..40).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn ideation_never_exceeds_max_or_yields_empty(raw in reply(), max in 0usize..15) {
        let candidates = parse_ideation_reply(&raw, max);
        prop_assert!(candidates.len() <= max);
        for candidate in &candidates {
            prop_assert!(!candidate.trim().is_empty());
            prop_assert_eq!(candidate.trim(), candidate.as_str());
        }
    }

    #[test]
    fn ideation_prefix_is_stable_under_smaller_max(raw in reply(), max in 1usize..15) {
        let full = parse_ideation_reply(&raw, max);
        let fewer = parse_ideation_reply(&raw, max - 1);
        prop_assert_eq!(&full[..fewer.len()], &fewer[..]);
    }

    #[test]
    fn annotate_only_reports_taxonomy_names(raw in reply(), max in 0usize..15) {
        let taxonomy: AttributeTaxonomy = [
            (AttributeCategory::Continuous, "revenue".to_string()),
            (AttributeCategory::Ordered, "rank".to_string()),
            (AttributeCategory::Categorical, "a".to_string()),
        ]
        .into_iter()
        .collect();

        let results = annotate(parse_ideation_reply(&raw, max), &taxonomy, max);
        prop_assert!(results.len() <= max);
        for record in &results {
            for attribute in record.attributes() {
                prop_assert!(taxonomy.category_of(attribute).is_some());
                prop_assert!(record.prompt().to_lowercase().contains(attribute.as_str()));
            }
        }
    }

    #[test]
    fn paired_reply_is_bounded_and_unique(raw in reply(), max in 0usize..15) {
        let results = parse_attribute_reply(&raw, max);
        prop_assert!(results.len() <= max);
        let mut prompts = results.prompts();
        let total = prompts.len();
        prompts.sort();
        prompts.dedup();
        prop_assert_eq!(prompts.len(), total);
        for record in &results {
            prop_assert!(!record.prompt().is_empty());
            prop_assert!(record.attributes().iter().all(|a| !a.is_empty()));
        }
    }
}
