//! Generation domain: question templates, immutable requests, and the
//! orchestrator that owns timeout and retry policy toward the grounded
//! text generator.

pub mod orchestrator;
pub mod provider_generator;
pub mod request;
pub mod template;

pub use orchestrator::{GroundedGenerator, Orchestrator};
pub use provider_generator::ProviderGenerator;
pub use request::GenerationRequest;
pub use template::{EntityPair, TaskKind, TaskQuestion, ATTRIBUTE_ANSWER_FORMAT};
