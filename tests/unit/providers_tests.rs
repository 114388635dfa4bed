/*!
 * Tests for provider implementations and the provider factory
 */

use serde_json::json;
use tslate::app_config::{Config, TranslationProvider};
use tslate::errors::ProviderError;
use tslate::providers::{BatchItem, Provider, create_provider};
use tslate::providers::anthropic::AnthropicRequest;
use tslate::providers::mock::MockProvider;
use tslate::providers::ollama::GenerationRequest;
use tslate::providers::openai::OpenAIRequest;

/// Test the factory against provider API key requirements
#[test]
fn test_create_provider_withMissingApiKey_shouldFailForHostedProviders() {
    let mut config = Config::default();

    config.translation.provider = TranslationProvider::OpenAI;
    assert!(matches!(
        create_provider(&config.translation),
        Err(ProviderError::AuthenticationError(_))
    ));

    config.translation.provider = TranslationProvider::Anthropic;
    assert!(matches!(
        create_provider(&config.translation),
        Err(ProviderError::AuthenticationError(_))
    ));

    // Ollama runs locally and needs no key
    config.translation.provider = TranslationProvider::Ollama;
    let provider = create_provider(&config.translation).expect("Ollama should build without a key");
    assert_eq!(provider.name(), "Ollama");
}

/// Test that the factory picks up configured credentials
#[test]
fn test_create_provider_withApiKey_shouldBuildClient() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::OpenAI;
    if let Some(provider_config) = config.translation.available_providers.iter_mut()
        .find(|p| p.provider_type == "openai") {
        provider_config.api_key = "sk-test".to_string();
    }

    let provider = create_provider(&config.translation).expect("OpenAI should build with a key");
    assert_eq!(provider.name(), "OpenAI");
}

/// Test OpenAI request builder serialization
#[test]
fn test_openai_request_withBuilder_shouldSerializeExpectedShape() {
    let request = OpenAIRequest::new("gpt-4.1-mini")
        .add_message("system", "be terse")
        .add_message("user", "hello")
        .temperature(0.3);

    let value = serde_json::to_value(&request).expect("request should serialize");
    assert_eq!(value["model"], json!("gpt-4.1-mini"));
    assert_eq!(value["messages"].as_array().map(|m| m.len()), Some(2));
    assert_eq!(value["messages"][0]["role"], json!("system"));
    assert!((value["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    // Unset optional fields are omitted entirely
    assert!(value.get("max_tokens").is_none());
}

/// Test Anthropic request builder serialization
#[test]
fn test_anthropic_request_withBuilder_shouldSerializeExpectedShape() {
    let request = AnthropicRequest::new("claude-3-haiku-20240307", 4096)
        .system("be terse")
        .add_message("user", "hello");

    let value = serde_json::to_value(&request).expect("request should serialize");
    assert_eq!(value["model"], json!("claude-3-haiku-20240307"));
    assert_eq!(value["max_tokens"], json!(4096));
    assert_eq!(value["system"], json!("be terse"));
    assert_eq!(value["messages"][0]["content"], json!("hello"));
    assert!(value.get("temperature").is_none());
}

/// Test Ollama request builder serialization
#[test]
fn test_ollama_request_withBuilder_shouldSerializeExpectedShape() {
    let request = GenerationRequest::new("llama3.2:3b", "translate this")
        .system("be terse")
        .temperature(0.3);

    let value = serde_json::to_value(&request).expect("request should serialize");
    assert_eq!(value["model"], json!("llama3.2:3b"));
    assert_eq!(value["prompt"], json!("translate this"));
    assert_eq!(value["stream"], json!(false));
    assert!(value["options"]["temperature"].is_number());
}

/// Test that the working mock produces a decodable numbered response
#[tokio::test]
async fn test_mock_provider_withWorkingBehavior_shouldNumberResponses() {
    let mock = MockProvider::working();
    let items = vec![
        BatchItem { text: "Open".to_string(), context: String::new() },
        BatchItem { text: "Close".to_string(), context: String::new() },
    ];

    let response = mock.translate_batch(&items, "en_US", "fr_FR").await
        .expect("working mock should succeed");

    assert_eq!(response, "#1: [fr_FR] Open\n#2: [fr_FR] Close");
    assert_eq!(mock.call_count(), 1);
    assert_eq!(mock.dispatched_batches(), vec![vec!["Open".to_string(), "Close".to_string()]]);
}

/// Test mock connection checks
#[tokio::test]
async fn test_mock_provider_testConnection_shouldFollowBehavior() {
    assert!(MockProvider::working().test_connection().await.is_ok());
    assert!(MockProvider::failing().test_connection().await.is_err());
}
