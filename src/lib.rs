//! Ideate: Schema-Grounded Analytic Prompt Generation
//!
//! Classifies a data-model schema into attribute and entity taxonomies, builds
//! grounding passages from them, asks a text generator for natural-language
//! analytic search prompts, and validates the reply into prompt records that
//! reference the schema's attributes.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod generation;
pub mod logging;
pub mod pipeline;
pub mod provider;
pub mod relations;
pub mod reply;
pub mod schema;

pub use error::IdeateError;
pub use pipeline::{PipelineMode, PromptPipeline};
pub use reply::{PromptRecord, ResultSet};
