//! Generated prompt presentation.

use super::shared::{format_section_heading, to_pretty_json};
use crate::reply::ResultSet;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

pub fn format_prompts_text(domain: &str, results: &ResultSet) -> String {
    let mut out = format!(
        "{}\n\n",
        format_section_heading(&format!("Prompts for {}", domain))
    );
    if results.is_empty() {
        out.push_str("No prompts were generated.");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Prompt", "Attributes"]);
    for (i, record) in results.iter().enumerate() {
        let attributes = if record.attributes().is_empty() {
            "-".to_string()
        } else {
            record
                .attributes()
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![(i + 1).to_string(), record.prompt().to_string(), attributes]);
    }
    out.push_str(&format!("{}\n\nTotal: {} prompt(s)", table, results.len()));
    out
}

/// JSON array of `{prompt, attributes}`.
pub fn format_prompts_json(results: &ResultSet) -> String {
    to_pretty_json(results)
}
