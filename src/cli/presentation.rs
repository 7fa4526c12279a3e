//! CLI presentation: text and json formatters per command family.

mod context;
mod prompts;
mod schema;
mod shared;

pub use context::{
    format_config_json, format_config_text, format_context_json, format_context_text,
};
pub use prompts::{format_prompts_json, format_prompts_text};
pub use schema::{
    format_relations_json, format_relations_text, format_taxonomy_json, format_taxonomy_text,
};
pub use shared::{format_section_heading, OutputFormat};
