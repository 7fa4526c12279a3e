//! Generation request: everything the grounded generator needs for one call.

use crate::context::ContextSet;
use crate::generation::template::{TaskKind, TaskQuestion};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Fully constructed before it reaches the generator and never mutated.
/// A retry builds a new request rather than reusing this one.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    domain: String,
    task: TaskKind,
    preamble: &'static str,
    question: String,
    context: ContextSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Value>,
    issued_at: DateTime<Utc>,
}

impl GenerationRequest {
    pub fn new(
        domain: impl Into<String>,
        question: &TaskQuestion,
        context: ContextSet,
        history: Option<Value>,
    ) -> Self {
        Self {
            domain: domain.into(),
            task: question.kind(),
            preamble: question.preamble(),
            question: question.render(),
            context,
            history,
            issued_at: Utc::now(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn task(&self) -> TaskKind {
        self.task
    }

    pub fn preamble(&self) -> &str {
        self.preamble
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn context(&self) -> &ContextSet {
        &self.context
    }

    pub fn history(&self) -> Option<&Value> {
        self.history.as_ref()
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Single prompt text: preamble, numbered documents, question.
    pub fn render_prompt(&self) -> String {
        let mut prompt = String::new();
        prompt.push_str(self.preamble);
        prompt.push_str("\nDomain: ");
        prompt.push_str(&self.domain);
        prompt.push_str("\nDocuments:\n");
        for passage in &self.context {
            prompt.push_str(&format!("[{}]\n", passage.rank() + 1));
            prompt.push_str(passage.text().trim_end());
            prompt.push_str("\n\n");
        }
        prompt.push_str("Question: ");
        prompt.push_str(&self.question);
        prompt.push_str("\nAnswer:\n");
        prompt
    }
}
