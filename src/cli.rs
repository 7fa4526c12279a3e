//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_config_json, format_config_text, format_context_json, format_context_text,
    format_prompts_json, format_prompts_text, format_relations_json, format_relations_text,
    format_section_heading, format_taxonomy_json, format_taxonomy_text, OutputFormat,
};
pub use route::RunContext;
