//! Context and configuration presentation.

use super::shared::{format_section_heading, to_pretty_json};
use crate::config::IdeateConfig;
use crate::context::ContextSet;
use serde_json::json;

pub fn format_context_text(context: &ContextSet) -> String {
    let mut out = String::new();
    for passage in context {
        out.push_str(&format!(
            "{} {}\n",
            format_section_heading(&format!("Passage {}", passage.rank())),
            &passage.digest()[..12]
        ));
        out.push_str(passage.text().trim_end());
        out.push_str("\n\n");
    }
    out.push_str(&format!("Fingerprint: {}", context.fingerprint()));
    out
}

pub fn format_context_json(context: &ContextSet) -> String {
    let passages: Vec<_> = context
        .iter()
        .map(|passage| {
            json!({
                "rank": passage.rank(),
                "digest": passage.digest(),
                "text": passage.text(),
            })
        })
        .collect();
    to_pretty_json(&json!({
        "passages": passages,
        "fingerprint": context.fingerprint(),
    }))
}

/// Effective configuration as TOML.
pub fn format_config_text(config: &IdeateConfig) -> String {
    toml::to_string_pretty(config).unwrap_or_else(|e| format!("# failed to render config: {}", e))
}

pub fn format_config_json(config: &IdeateConfig) -> String {
    to_pretty_json(config)
}
