//! Provider configuration schema: which backend to call and how to reach it.
//!
//! Credentials are never stored in configuration. A provider names the
//! environment variable that holds its API key and the key is resolved when
//! the client is built.

use crate::error::ApiError;
use crate::provider::{CompletionOptions, ModelProvider};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[serde(rename = "openai")]
    OpenAI,
    Anthropic,
    Ollama,
    #[serde(rename = "local")]
    LocalCustom,
    #[serde(rename = "huggingface")]
    HuggingFace,
}

pub fn provider_type_slug(provider_type: ProviderType) -> &'static str {
    match provider_type {
        ProviderType::OpenAI => "openai",
        ProviderType::Anthropic => "anthropic",
        ProviderType::Ollama => "ollama",
        ProviderType::LocalCustom => "local",
        ProviderType::HuggingFace => "huggingface",
    }
}

impl ProviderType {
    pub fn parse(slug: &str) -> Result<Self, ApiError> {
        match slug {
            "openai" => Ok(ProviderType::OpenAI),
            "anthropic" => Ok(ProviderType::Anthropic),
            "ollama" => Ok(ProviderType::Ollama),
            "local" => Ok(ProviderType::LocalCustom),
            "huggingface" => Ok(ProviderType::HuggingFace),
            _ => Err(ApiError::ConfigError(format!(
                "Invalid provider type: {}. Must be openai, anthropic, ollama, local, or huggingface",
                slug
            ))),
        }
    }

    /// Environment variable consulted for the API key when none is configured.
    pub fn default_api_key_env(self) -> Option<&'static str> {
        match self {
            ProviderType::OpenAI => Some("OPENAI_API_KEY"),
            ProviderType::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderType::HuggingFace => Some("HF_TOKEN"),
            ProviderType::Ollama | ProviderType::LocalCustom => None,
        }
    }

    pub fn requires_api_key(self) -> bool {
        matches!(
            self,
            ProviderType::OpenAI | ProviderType::Anthropic | ProviderType::HuggingFace
        )
    }
}

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider_type: ProviderType,

    pub model: String,

    /// Base URL override; required for `local`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Name of the environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(default)]
    pub default_options: CompletionOptions,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: ProviderType::HuggingFace,
            model: "HuggingFaceH4/zephyr-7b-beta".to_string(),
            endpoint: None,
            api_key_env: None,
            default_options: CompletionOptions::default(),
        }
    }
}

impl ProviderConfig {
    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }

        if let Some(endpoint) = &self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(format!(
                    "Endpoint must be an http(s) URL, got '{}'",
                    endpoint
                ));
            }
        } else if self.provider_type == ProviderType::LocalCustom {
            return Err("Local providers require an endpoint".to_string());
        }

        if let Some(var) = &self.api_key_env {
            if var.trim().is_empty() {
                return Err("api_key_env cannot be empty".to_string());
            }
        }

        if let Some(temperature) = self.default_options.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!(
                    "Temperature must be between 0.0 and 2.0, got {}",
                    temperature
                ));
            }
        }

        Ok(())
    }

    /// Environment variable that would be read for the API key, if any.
    pub fn api_key_env_var(&self) -> Option<&str> {
        self.api_key_env
            .as_deref()
            .or_else(|| self.provider_type.default_api_key_env())
    }

    /// Read the API key from the environment.
    pub fn resolve_api_key(&self) -> Result<Option<String>, ApiError> {
        let Some(var) = self.api_key_env_var() else {
            return Ok(None);
        };
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(Some(value)),
            _ if self.provider_type.requires_api_key() => Err(ApiError::ProviderNotConfigured(
                format!(
                    "API key for {} provider not found in environment variable {}",
                    provider_type_slug(self.provider_type),
                    var
                ),
            )),
            _ => Ok(None),
        }
    }

    /// Convert to a concrete provider description, resolving credentials.
    pub fn to_model_provider(&self) -> Result<ModelProvider, ApiError> {
        self.validate().map_err(ApiError::ConfigError)?;
        let api_key = self.resolve_api_key()?;
        let model = self.model.clone();
        let endpoint = self.endpoint.clone();

        let missing_key = || {
            ApiError::ProviderNotConfigured(format!(
                "{} provider requires an API key",
                provider_type_slug(self.provider_type)
            ))
        };

        Ok(match self.provider_type {
            ProviderType::OpenAI => ModelProvider::OpenAI {
                model,
                api_key: api_key.ok_or_else(missing_key)?,
                base_url: endpoint,
            },
            ProviderType::Anthropic => ModelProvider::Anthropic {
                model,
                api_key: api_key.ok_or_else(missing_key)?,
            },
            ProviderType::Ollama => ModelProvider::Ollama {
                model,
                base_url: endpoint,
            },
            ProviderType::LocalCustom => ModelProvider::LocalCustom {
                model,
                endpoint: endpoint.unwrap_or_default(),
                api_key,
            },
            ProviderType::HuggingFace => ModelProvider::HuggingFace {
                model,
                api_key: api_key.ok_or_else(missing_key)?,
                base_url: endpoint,
            },
        })
    }
}
