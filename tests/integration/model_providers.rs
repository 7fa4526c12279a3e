//! Integration tests for model provider construction from configuration

use ideate::config::{ProviderConfig, ProviderType};
use ideate::generation::ProviderGenerator;
use ideate::provider::{CompletionOptions, ModelProvider, ProviderFactory};
use std::sync::Mutex;
use std::time::Duration;

// Serializes tests that set provider API-key variables.
static KEY_ENV_MUTEX: Mutex<()> = Mutex::new(());

fn config(provider_type: ProviderType, model: &str) -> ProviderConfig {
    ProviderConfig {
        provider_type,
        model: model.to_string(),
        endpoint: None,
        api_key_env: None,
        default_options: CompletionOptions::default(),
    }
}

#[test]
fn test_openai_client_from_model_provider() {
    let client = ProviderFactory::create_client(&ModelProvider::OpenAI {
        model: "gpt-4o-mini".to_string(),
        api_key: "test-key".to_string(),
        base_url: None,
    })
    .unwrap();
    assert_eq!(client.provider_name(), "openai");
    assert_eq!(client.model_name(), "gpt-4o-mini");
}

#[test]
fn test_anthropic_client_from_model_provider() {
    let client = ProviderFactory::create_client(&ModelProvider::Anthropic {
        model: "claude-3-haiku".to_string(),
        api_key: "test-key".to_string(),
    })
    .unwrap();
    assert_eq!(client.provider_name(), "anthropic");
}

#[test]
fn test_ollama_needs_no_key() {
    let client =
        ProviderFactory::from_config(&config(ProviderType::Ollama, "llama3"), Duration::from_secs(5))
            .unwrap();
    assert_eq!(client.provider_name(), "ollama");
    assert_eq!(client.model_name(), "llama3");
}

#[test]
fn test_huggingface_key_read_from_named_env_var() {
    let _guard = KEY_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let var = "IDEATE_TEST_HF_TOKEN";
    std::env::set_var(var, "hf_test_token");

    let mut provider = config(ProviderType::HuggingFace, "HuggingFaceH4/zephyr-7b-beta");
    provider.api_key_env = Some(var.to_string());
    let client = ProviderFactory::from_config(&provider, Duration::from_secs(5)).unwrap();
    assert_eq!(client.provider_name(), "huggingface");

    let generator = ProviderGenerator::new(client, provider.default_options.clone());
    assert_eq!(generator.model_name(), "HuggingFaceH4/zephyr-7b-beta");

    std::env::remove_var(var);
}

#[test]
fn test_missing_key_is_not_configured_error() {
    let _guard = KEY_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let var = "IDEATE_TEST_MISSING_KEY";
    std::env::remove_var(var);

    let mut provider = config(ProviderType::OpenAI, "gpt-4o-mini");
    provider.api_key_env = Some(var.to_string());
    let err = ProviderFactory::from_config(&provider, Duration::from_secs(5))
        .err()
        .unwrap();
    assert!(err.to_string().contains(var));
}

#[test]
fn test_local_provider_requires_endpoint() {
    let provider = config(ProviderType::LocalCustom, "local-model");
    assert!(provider.validate().is_err());

    let mut provider = provider;
    provider.endpoint = Some("http://localhost:8080/v1".to_string());
    let client = ProviderFactory::from_config(&provider, Duration::from_secs(5)).unwrap();
    assert_eq!(client.model_name(), "local-model");
}

#[test]
fn test_provider_config_toml_round_trip() {
    let mut provider = config(ProviderType::Ollama, "llama3");
    provider.endpoint = Some("http://localhost:11434".to_string());

    let text = toml::to_string(&provider).unwrap();
    assert!(text.contains("provider_type = \"ollama\""));
    let parsed: ProviderConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed.model, "llama3");
    assert_eq!(parsed.endpoint.as_deref(), Some("http://localhost:11434"));
}
