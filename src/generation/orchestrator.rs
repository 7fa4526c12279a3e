//! Generation orchestrator: one request to the grounded generator, bounded by
//! a timeout, with exactly one fresh retry before giving up.

use crate::context::ContextSet;
use crate::error::{ApiError, GenerationError};
use crate::generation::request::GenerationRequest;
use crate::generation::template::TaskQuestion;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// External collaborator: accepts context passages and a question, returns
/// free-form text.
#[async_trait]
pub trait GroundedGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ApiError>;
}

/// Why a single attempt produced nothing usable.
#[derive(Debug)]
enum AttemptFailure {
    TimedOut(Duration),
    Failed(ApiError),
    EmptyReply,
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptFailure::TimedOut(limit) => {
                write!(f, "generator timed out after {}ms", limit.as_millis())
            }
            AttemptFailure::Failed(err) => write!(f, "{}", err),
            AttemptFailure::EmptyReply => f.write_str("generator returned no text"),
        }
    }
}

/// Holds no state across calls beyond its collaborator and timeout.
#[derive(Clone)]
pub struct Orchestrator {
    generator: Arc<dyn GroundedGenerator>,
    timeout: Duration,
}

impl Orchestrator {
    /// First attempt plus one retry.
    pub const MAX_ATTEMPTS: u32 = 2;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    pub fn new(generator: Arc<dyn GroundedGenerator>) -> Self {
        Self::with_timeout(generator, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(generator: Arc<dyn GroundedGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `question` against `context`. Each attempt gets a freshly built
    /// request; after the second failure `GenerationError::Unavailable` is
    /// returned and no further attempt is made.
    pub async fn generate(
        &self,
        domain: &str,
        context: &ContextSet,
        question: &TaskQuestion,
        history: Option<&Value>,
    ) -> Result<String, GenerationError> {
        let mut last_failure = None;

        for attempt in 1..=Self::MAX_ATTEMPTS {
            let request =
                GenerationRequest::new(domain, question, context.clone(), history.cloned());
            debug!(
                attempt,
                task = %request.task(),
                passages = context.len(),
                context = %context.fingerprint(),
                "Dispatching generation request"
            );

            let failure = match tokio::time::timeout(self.timeout, self.generator.generate(&request)).await {
                Err(_) => AttemptFailure::TimedOut(self.timeout),
                Ok(Err(err)) => AttemptFailure::Failed(err),
                Ok(Ok(reply)) if reply.trim().is_empty() => AttemptFailure::EmptyReply,
                Ok(Ok(reply)) => {
                    info!(
                        attempt,
                        task = %request.task(),
                        reply_chars = reply.len(),
                        "Generation succeeded"
                    );
                    return Ok(reply);
                }
            };

            warn!(
                attempt,
                max_attempts = Self::MAX_ATTEMPTS,
                task = %request.task(),
                reason = %failure,
                "Generation attempt failed"
            );
            last_failure = Some(failure);
        }

        Err(GenerationError::Unavailable {
            attempts: Self::MAX_ATTEMPTS,
            reason: last_failure
                .map(|f| f.to_string())
                .unwrap_or_else(|| "no attempt made".to_string()),
        })
    }
}
