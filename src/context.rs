//! Grounding context: ordered passages that constrain the generator's reply
//! to the classified schema.

pub mod builder;
pub mod passage;
pub mod semantics;

pub use builder::{
    build_context, build_extraction_context, parse_taxonomy_passage, render_history_passage,
    render_taxonomy_passage,
};
pub use passage::{ContextPassage, ContextSet};
pub use semantics::{DomainSemantics, QUERY_SEMANTICS};
