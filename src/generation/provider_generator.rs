//! Grounded generator backed by a model provider client.

use crate::error::ApiError;
use crate::generation::orchestrator::GroundedGenerator;
use crate::generation::request::GenerationRequest;
use crate::provider::{ChatMessage, CompletionOptions, ModelProviderClient};
use async_trait::async_trait;
use tracing::debug;

/// Renders the request into a single user message and sends it to the
/// configured provider. Every passage is included; there is no retrieval
/// step narrowing them down.
pub struct ProviderGenerator {
    client: Box<dyn ModelProviderClient>,
    options: CompletionOptions,
}

impl ProviderGenerator {
    pub fn new(client: Box<dyn ModelProviderClient>, options: CompletionOptions) -> Self {
        Self { client, options }
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }
}

#[async_trait]
impl GroundedGenerator for ProviderGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ApiError> {
        let prompt = request.render_prompt();
        debug!(
            provider = self.client.provider_name(),
            model = self.client.model_name(),
            task = %request.task(),
            prompt_chars = prompt.len(),
            "Sending generation prompt"
        );

        let response = self
            .client
            .complete(vec![ChatMessage::user(prompt)], self.options.clone())
            .await?;

        debug!(
            model = %response.model,
            completion_tokens = response.usage.completion_tokens,
            finish_reason = response.finish_reason.as_deref().unwrap_or(""),
            "Provider replied"
        );
        Ok(response.content)
    }
}
