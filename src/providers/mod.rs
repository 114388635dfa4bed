/*!
 * Provider implementations for different translation backends.
 *
 * This module contains client implementations for various LLM providers:
 * - OpenAI: OpenAI API integration (and OpenAI-compatible servers)
 * - Anthropic: Anthropic API integration
 * - Ollama: Local LLM server
 * - Mock: scripted backend for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

/// One unit of a batch request: the text to translate plus its context hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// Source text to translate
    pub text: String,

    /// Context string assembled from the unit's component, comment and location;
    /// empty when the unit carries no hints
    pub context: String,
}

/// Common trait for all translation backends
///
/// A backend accepts one batch of (text, context) pairs plus a language pair
/// and returns the raw response text for the whole batch. Decoding the raw
/// response into per-unit strings is the caller's concern, so that malformed
/// responses and outright request failures feed the same retry policy.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Human-readable backend name for logs
    fn name(&self) -> &str;

    /// Translate one batch, returning the backend's raw response text
    ///
    /// # Arguments
    /// * `items` - Ordered batch of texts with their context hints
    /// * `source_language` - Source locale code
    /// * `target_language` - Target locale code
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - Raw response text, or a backend failure
    async fn translate_batch(
        &self,
        items: &[BatchItem],
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError>;

    /// Test the connection to the backend
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

/// Build the configured provider client
pub fn create_provider(config: &TranslationConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let provider: Arc<dyn Provider> = match config.provider {
        TranslationProvider::OpenAI => {
            let api_key = config.get_api_key();
            if api_key.is_empty() {
                return Err(ProviderError::AuthenticationError(
                    "OpenAI provider requires an API key".to_string(),
                ));
            }
            Arc::new(openai::OpenAI::new(
                api_key,
                config.get_endpoint(),
                config.get_model(),
                config.common.temperature,
                config.common.system_prompt.clone(),
            ))
        },
        TranslationProvider::Anthropic => {
            let api_key = config.get_api_key();
            if api_key.is_empty() {
                return Err(ProviderError::AuthenticationError(
                    "Anthropic provider requires an API key".to_string(),
                ));
            }
            Arc::new(anthropic::Anthropic::new(
                api_key,
                config.get_endpoint(),
                config.get_model(),
                config.common.temperature,
                config.common.system_prompt.clone(),
            ))
        },
        TranslationProvider::Ollama => Arc::new(ollama::Ollama::new(
            config.get_endpoint(),
            config.get_model(),
            config.common.temperature,
            config.common.system_prompt.clone(),
        )),
    };

    Ok(provider)
}

pub mod openai;
pub mod anthropic;
pub mod ollama;
pub mod mock;
