//! Error types for the ideate prompt generation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Schema and history document errors
#[derive(Debug, Error)]
pub enum SchemaParseError {
    #[error("Failed to read document {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed schema document: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Malformed history document {path:?}: {source}")]
    MalformedHistory {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Provider-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider request timed out: {0}")]
    ProviderTimeout(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Orchestrator failure after its retry budget is spent
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generation unavailable after {attempts} attempt(s): {reason}")]
    Unavailable { attempts: u32, reason: String },
}

/// Top-level pipeline error surfaced to the enclosing service
#[derive(Debug, Error)]
pub enum IdeateError {
    #[error(transparent)]
    Schema(#[from] SchemaParseError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<config::ConfigError> for IdeateError {
    fn from(err: config::ConfigError) -> Self {
        IdeateError::Api(ApiError::from(err))
    }
}

impl IdeateError {
    /// True when the collaborator could not produce a reply.
    pub fn is_generation_unavailable(&self) -> bool {
        matches!(self, IdeateError::Generation(GenerationError::Unavailable { .. }))
    }
}
