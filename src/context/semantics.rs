//! Static domain semantics: how taxonomy categories map onto the components
//! of an analytic query.

use crate::schema::{AttributeCategory, EntityRole, TaxonomyPair};

const DEFAULT_GUIDANCE: &str = "\
Uses the following (but not limited to) attribute and entity types:
Attribute Type:
Continuous: To measure growth metrics (e.g., revenue, user base).
Ordered: To rank growth rates.
Entity Type:
Fact: To calculate growth based on factual data over time.
Key-Value Conditions: aggregationMethods, rowCount";

/// Query shape the generated prompts should follow.
pub const QUERY_SEMANTICS: &str =
    "<Action> <Subject> <Time Frame> <Comparison> <Conditions>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSemantics {
    guidance: String,
}

impl Default for DomainSemantics {
    fn default() -> Self {
        Self::new(DEFAULT_GUIDANCE)
    }
}

impl DomainSemantics {
    pub fn new(guidance: impl Into<String>) -> Self {
        Self {
            guidance: guidance.into(),
        }
    }

    pub fn guidance(&self) -> &str {
        &self.guidance
    }

    /// Guidance followed by the query shape, with the subject drawn from Fact
    /// entities and the remaining components from Continuous and Ordered
    /// attributes.
    pub fn render(&self, pair: &TaxonomyPair) -> String {
        format!(
            "{guidance}\n\nQuery semantics: {shape}\nHere, <Subject> must be taken from {facts}.\nRest should be taken from {continuous} and {ordered}.\n",
            guidance = self.guidance.trim_end(),
            shape = QUERY_SEMANTICS,
            facts = render_list(pair.entities.get(EntityRole::Fact)),
            continuous = render_list(pair.attributes.get(AttributeCategory::Continuous)),
            ordered = render_list(pair.attributes.get(AttributeCategory::Ordered)),
        )
    }
}

fn render_list(names: &[String]) -> String {
    serde_json::to_string(names).unwrap_or_else(|_| "[]".to_string())
}
