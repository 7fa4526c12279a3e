//! Attribute annotation by case-insensitive substring match.

use crate::reply::record::{PromptRecord, ResultSet};
use crate::schema::AttributeTaxonomy;
use std::collections::BTreeSet;

/// Lower-cased taxonomy names paired with their original spelling.
struct Needles<'a> {
    names: Vec<(String, &'a str)>,
}

impl<'a> Needles<'a> {
    fn new(taxonomy: &'a AttributeTaxonomy) -> Self {
        let names = taxonomy
            .names()
            .filter(|name| !name.trim().is_empty())
            .map(|name| (name.to_lowercase(), name))
            .collect();
        Self { names }
    }

    fn matches(&self, text: &str) -> BTreeSet<String> {
        let haystack = text.to_lowercase();
        self.names
            .iter()
            .filter(|(needle, _)| haystack.contains(needle.as_str()))
            .map(|(_, name)| (*name).to_string())
            .collect()
    }
}

/// Every taxonomy attribute whose name occurs in `text`, ignoring case.
/// Names keep the taxonomy's spelling.
pub fn matching_attributes(text: &str, taxonomy: &AttributeTaxonomy) -> BTreeSet<String> {
    Needles::new(taxonomy).matches(text)
}

/// Turn candidates into records, keeping at most `max_count` unique prompts.
/// A candidate that matches no attribute still becomes a record.
pub fn annotate<I, S>(candidates: I, taxonomy: &AttributeTaxonomy, max_count: usize) -> ResultSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let needles = Needles::new(taxonomy);
    let records = candidates.into_iter().filter_map(|candidate| {
        let text = candidate.as_ref();
        PromptRecord::new(text, needles.matches(text))
    });
    ResultSet::from_records(max_count, records)
}

/// Rewrite model-reported attribute names as the taxonomy names they mention,
/// ignoring case. Reported names that mention no taxonomy attribute are
/// dropped; the records themselves are kept.
pub fn restrict_to_taxonomy(results: ResultSet, taxonomy: &AttributeTaxonomy) -> ResultSet {
    let needles = Needles::new(taxonomy);
    let capacity = results.capacity();
    let records = results.into_records().into_iter().filter_map(|record| {
        let attributes: BTreeSet<String> = record
            .attributes()
            .iter()
            .flat_map(|reported| needles.matches(reported))
            .collect();
        PromptRecord::new(record.prompt(), attributes)
    });
    ResultSet::from_records(capacity, records)
}
