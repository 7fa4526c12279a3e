//! Configuration System
//!
//! Layered configuration: built-in defaults, the global user file, workspace
//! files, then `IDEATE__`-prefixed environment variables. Everything the
//! pipeline needs (provider, timeouts, prompt cap, mode) is resolved here and
//! passed explicitly; nothing is read from globals afterwards.

use crate::logging::{validate_logging_config, LoggingConfig};
use crate::pipeline::PipelineMode;
use crate::reply::DEFAULT_MAX_PROMPTS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use crate::provider::{ProviderConfig, ProviderType};
pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdeateConfig {
    /// Backend serving as the grounded text generator
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Pipeline settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Upper bound on prompts returned per request
    #[serde(default = "default_max_prompts")]
    pub max_prompts: usize,

    /// Per-attempt bound on a generator call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub pipeline_mode: PipelineMode,

    /// Replaces the built-in query-semantics guidance when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantics: Option<String>,
}

fn default_max_prompts() -> usize {
    DEFAULT_MAX_PROMPTS
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_prompts: default_max_prompts(),
            timeout_secs: default_timeout_secs(),
            pipeline_mode: PipelineMode::default(),
            semantics: None,
        }
    }
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_prompts == 0 {
            return Err("max_prompts must be at least 1".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        if let Some(semantics) = &self.semantics {
            if semantics.trim().is_empty() {
                return Err("semantics cannot be empty when set".to_string());
            }
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Provider(String),
    Generation(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Generation(msg) => write!(f, "Generation: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl IdeateConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }
        if let Err(e) = self.generation.validate() {
            errors.push(ValidationError::Generation(e));
        }
        if let Err(e) = validate_logging_config(&self.logging) {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
