//! `Prompt:` / `Attributes:` reply parser for the delegated pipeline.
//!
//! Pairing is lossy: a `Prompt:` line followed by another `Prompt:` line is
//! dropped, and an `Attributes:` line with no pending prompt is ignored.

use crate::reply::ideation::strip_one_quote_layer;
use crate::reply::record::{PromptRecord, ResultSet};
use tracing::debug;

const PROMPT_MARKER: &str = "Prompt:";
const ATTRIBUTES_MARKER: &str = "Attributes:";

/// Pair each attributes line with the most recent unconsumed prompt line.
pub fn parse_attribute_reply(raw: &str, max_count: usize) -> ResultSet {
    let mut pending: Option<String> = None;
    let mut records = Vec::new();

    for line in raw.lines() {
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix(PROMPT_MARKER) {
            let prompt = strip_one_quote_layer(rest.trim()).trim().to_string();
            if let Some(dropped) = pending.replace(prompt) {
                debug!(prompt = %dropped, "Prompt without attributes line dropped");
            }
        } else if let Some(rest) = line.strip_prefix(ATTRIBUTES_MARKER) {
            let Some(prompt) = pending.take() else {
                debug!("Attributes line without a preceding prompt ignored");
                continue;
            };
            if let Some(record) = PromptRecord::new(prompt, split_attributes(rest)) {
                records.push(record);
            }
        }
    }

    if let Some(dropped) = pending {
        debug!(prompt = %dropped, "Trailing prompt without attributes line dropped");
    }
    ResultSet::from_records(max_count, records)
}

fn split_attributes(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
