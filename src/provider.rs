//! Model Provider Abstraction
//!
//! Unified interface over the LLM backends that can serve as the grounded text
//! generator: OpenAI, Anthropic, Ollama, custom OpenAI-compatible servers and
//! the Hugging Face Inference API.

use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

pub mod profile;

pub use profile::{provider_type_slug, ProviderConfig, ProviderType};

/// Concrete provider with resolved credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ModelProvider {
    OpenAI {
        model: String,
        api_key: String,
        base_url: Option<String>,
    },
    Anthropic {
        model: String,
        api_key: String,
    },
    Ollama {
        model: String,
        base_url: Option<String>, // Default: http://localhost:11434
    },
    LocalCustom {
        model: String,
        endpoint: String, // Full endpoint URL (e.g., http://localhost:8080/v1)
        api_key: Option<String>,
    },
    HuggingFace {
        model: String,
        api_key: String,
        base_url: Option<String>,
    },
}

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    fn as_str(self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Completion options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>, // 0.0-2.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: Some(0.7),
            max_tokens: Some(1024),
            top_p: None,
            stop: None,
        }
    }
}

/// Token usage information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub usage: TokenUsage,
    pub finish_reason: Option<String>,
}

/// Model provider client trait
#[async_trait]
pub trait ModelProviderClient: Send + Sync {
    /// Generate a completion from a list of messages
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError>;

    fn provider_name(&self) -> &str;

    fn model_name(&self) -> &str;
}

fn map_http_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::ProviderTimeout(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else {
        ApiError::ProviderError(format!("HTTP error: {}", error))
    }
}

fn map_status_error(status: StatusCode, body: String) -> ApiError {
    match status.as_u16() {
        401 | 403 => ApiError::ProviderAuthFailed(format!("Authentication failed: {}", body)),
        429 => ApiError::ProviderRateLimit(format!("Rate limit exceeded: {}", body)),
        404 => ApiError::ProviderModelNotFound(format!("Model not found: {}", body)),
        408 | 504 => ApiError::ProviderTimeout(format!("Upstream timeout ({}): {}", status, body)),
        _ => ApiError::ProviderRequestFailed(format!(
            "Request failed with status {}: {}",
            status, body
        )),
    }
}

/// Send a JSON request and decode a JSON response, mapping transport and
/// status failures onto `ApiError`.
async fn send_json<T: for<'de> Deserialize<'de>>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request.send().await.map_err(map_http_error)?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(map_status_error(status, body));
    }

    response
        .json()
        .await
        .map_err(|e| ApiError::ProviderError(format!("Failed to parse response: {}", e)))
}

const PROVIDER_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const PROVIDER_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn build_provider_http_client(request_timeout: Duration) -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(PROVIDER_HTTP_CONNECT_TIMEOUT)
        .timeout(request_timeout)
        .build()
        .map_err(|e| ApiError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

// OpenAI-compatible chat completions wire format
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    model: String,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: WireMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint
/// (OpenAI itself, Ollama's compatibility layer, custom local servers).
pub struct ChatCompletionsClient {
    client: Client,
    provider_name: &'static str,
    model: String,
    url: String,
    api_key: Option<String>,
}

impl ChatCompletionsClient {
    pub fn openai(
        model: String,
        api_key: String,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string());
        Self::new("openai", model, format!("{}/chat/completions", base_url), Some(api_key), timeout)
    }

    pub fn ollama(model: String, base_url: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.unwrap_or_else(|| "http://localhost:11434".to_string());
        Self::new("ollama", model, format!("{}/v1/chat/completions", base_url), None, timeout)
    }

    pub fn local(
        model: String,
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        Self::new("local", model, format!("{}/chat/completions", endpoint), api_key, timeout)
    }

    fn new(
        provider_name: &'static str,
        model: String,
        url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_provider_http_client(timeout)?,
            provider_name,
            model,
            url,
            api_key,
        })
    }
}

#[async_trait]
impl ModelProviderClient for ChatCompletionsClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: messages
                .into_iter()
                .map(|msg| WireMessage {
                    role: msg.role.as_str().to_string(),
                    content: msg.content,
                })
                .collect(),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            top_p: options.top_p,
            stop: options.stop,
            stream: false,
        };

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let completion: ChatCompletionResponse = send_json(builder).await?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::ProviderError("No choices in response".to_string()))?;
        let usage = completion.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(CompletionResponse {
            content: choice.message.content,
            model: completion.model,
            usage: usage.unwrap_or_default(),
            finish_reason: choice.finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        self.provider_name
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Anthropic Messages API client
pub struct AnthropicClient {
    client: Client,
    model: String,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(model: String, api_key: String, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_provider_http_client(timeout)?,
            model,
            api_key,
        })
    }
}

#[async_trait]
impl ModelProviderClient for AnthropicClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .map(|m| m.content.as_str())
            .collect();
        let turns: Vec<_> = messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|m| json!({"role": m.role.as_str(), "content": m.content}))
            .collect();

        let mut body = json!({
            "model": self.model,
            "max_tokens": options.max_tokens.unwrap_or(1024),
            "messages": turns,
        });
        if !system.is_empty() {
            body["system"] = json!(system.join("\n\n"));
        }
        if let Some(temperature) = options.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(stop) = options.stop {
            body["stop_sequences"] = json!(stop);
        }

        #[derive(Deserialize)]
        struct AnthropicResponse {
            content: Vec<AnthropicContent>,
            model: String,
            stop_reason: Option<String>,
            usage: Option<AnthropicUsage>,
        }

        #[derive(Deserialize)]
        struct AnthropicContent {
            #[serde(default)]
            text: String,
        }

        #[derive(Deserialize)]
        struct AnthropicUsage {
            input_tokens: u32,
            output_tokens: u32,
        }

        let request = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body);
        let completion: AnthropicResponse = send_json(request).await?;

        let content = completion
            .content
            .into_iter()
            .map(|c| c.text)
            .collect::<Vec<_>>()
            .join("");
        let usage = completion
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.input_tokens,
                completion_tokens: u.output_tokens,
                total_tokens: u.input_tokens + u.output_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: completion.model,
            usage,
            finish_reason: completion.stop_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Hugging Face serverless Inference API client (text-generation task).
///
/// The API takes a single prompt string, so chat messages are flattened in
/// order, separated by blank lines.
pub struct HuggingFaceClient {
    client: Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl HuggingFaceClient {
    pub fn new(
        model: String,
        api_key: String,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            client: build_provider_http_client(timeout)?,
            model,
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://api-inference.huggingface.co/models".to_string()),
        })
    }
}

pub(crate) fn flatten_messages(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| m.content.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl ModelProviderClient for HuggingFaceClient {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        let mut parameters = json!({ "return_full_text": false });
        if let Some(max_tokens) = options.max_tokens {
            parameters["max_new_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = options.temperature {
            parameters["temperature"] = json!(temperature);
        }
        if let Some(top_p) = options.top_p {
            parameters["top_p"] = json!(top_p);
        }
        if let Some(stop) = options.stop {
            parameters["stop"] = json!(stop);
        }
        let body = json!({
            "inputs": flatten_messages(&messages),
            "parameters": parameters,
            "options": { "use_cache": false, "wait_for_model": true },
        });

        #[derive(Deserialize)]
        struct Generated {
            generated_text: String,
        }

        let url = format!("{}/{}", self.base_url, self.model);
        let request = self.client.post(&url).bearer_auth(&self.api_key).json(&body);
        let generated: Vec<Generated> = send_json(request).await?;
        let content = generated
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| ApiError::ProviderError("No generations in response".to_string()))?;

        Ok(CompletionResponse {
            content,
            model: self.model.clone(),
            usage: TokenUsage::default(),
            finish_reason: None,
        })
    }

    fn provider_name(&self) -> &str {
        "huggingface"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Provider factory for creating provider clients
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_client(provider: &ModelProvider) -> Result<Box<dyn ModelProviderClient>, ApiError> {
        Self::create_client_with_timeout(provider, PROVIDER_HTTP_REQUEST_TIMEOUT)
    }

    pub fn create_client_with_timeout(
        provider: &ModelProvider,
        timeout: Duration,
    ) -> Result<Box<dyn ModelProviderClient>, ApiError> {
        match provider.clone() {
            ModelProvider::OpenAI {
                model,
                api_key,
                base_url,
            } => Ok(Box::new(ChatCompletionsClient::openai(
                model, api_key, base_url, timeout,
            )?)),
            ModelProvider::Anthropic { model, api_key } => {
                Ok(Box::new(AnthropicClient::new(model, api_key, timeout)?))
            }
            ModelProvider::Ollama { model, base_url } => {
                Ok(Box::new(ChatCompletionsClient::ollama(model, base_url, timeout)?))
            }
            ModelProvider::LocalCustom {
                model,
                endpoint,
                api_key,
            } => Ok(Box::new(ChatCompletionsClient::local(
                model, endpoint, api_key, timeout,
            )?)),
            ModelProvider::HuggingFace {
                model,
                api_key,
                base_url,
            } => Ok(Box::new(HuggingFaceClient::new(
                model, api_key, base_url, timeout,
            )?)),
        }
    }

    /// Resolve credentials from `config` and build its client.
    pub fn from_config(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn ModelProviderClient>, ApiError> {
        let provider = config.to_model_provider()?;
        Self::create_client_with_timeout(&provider, timeout)
    }
}

// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    responses: Vec<Result<String, String>>,
    current: std::sync::Arc<std::sync::Mutex<usize>>,
    received: std::sync::Arc<std::sync::Mutex<Vec<Vec<ChatMessage>>>>,
}

#[cfg(test)]
impl MockProvider {
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses,
            current: Default::default(),
            received: Default::default(),
        }
    }

    pub fn calls(&self) -> usize {
        *self.current.lock().unwrap()
    }

    pub fn received(&self) -> Vec<Vec<ChatMessage>> {
        self.received.lock().unwrap().clone()
    }

    /// Shared view of received messages that outlives moving the mock into a box.
    pub fn received_handle(&self) -> std::sync::Arc<std::sync::Mutex<Vec<Vec<ChatMessage>>>> {
        std::sync::Arc::clone(&self.received)
    }
}

#[cfg(test)]
#[async_trait]
impl ModelProviderClient for MockProvider {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        _options: CompletionOptions,
    ) -> Result<CompletionResponse, ApiError> {
        self.received.lock().unwrap().push(messages);
        let mut idx = self.current.lock().unwrap();
        let response = self
            .responses
            .get(*idx)
            .cloned()
            .unwrap_or_else(|| Ok("Mock response".to_string()));
        *idx += 1;

        response
            .map(|content| CompletionResponse {
                content,
                model: "mock-model".to_string(),
                usage: TokenUsage {
                    prompt_tokens: 10,
                    completion_tokens: 20,
                    total_tokens: 30,
                },
                finish_reason: Some("stop".to_string()),
            })
            .map_err(ApiError::ProviderRequestFailed)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
