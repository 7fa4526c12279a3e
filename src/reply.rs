//! Reply parsing and validation. Parsers are total: malformed or empty
//! replies produce empty results, never errors.

pub mod annotate;
pub mod ideation;
pub mod paired;
pub mod record;

pub use annotate::{annotate, matching_attributes, restrict_to_taxonomy};
pub use ideation::{candidate_text, parse_ideation_reply};
pub use paired::parse_attribute_reply;
pub use record::{PromptRecord, ResultSet, DEFAULT_MAX_PROMPTS};
