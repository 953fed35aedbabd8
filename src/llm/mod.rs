//! LLM integration for Lead Assist.
//!
//! Supports **Gemini** through its `generateContent` REST API. The
//! `LlmProvider` trait keeps the AI proxy and the chatbot independent of the
//! backend so tests can swap in a stub.

pub mod assistant;
pub mod gemini;
pub mod provider;

pub use assistant::CompanyAssistant;
pub use gemini::GeminiProvider;
pub use provider::*;

use std::sync::Arc;

use secrecy::SecretString;

use crate::config::DEFAULT_SYSTEM_PROMPT;
use crate::error::{ConfigError, LlmError};

/// Supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    Gemini,
}

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub backend: LlmBackend,
    pub api_key: SecretString,
    pub model: String,
    pub base_url: String,
    /// Prepended to every conversation sent to the model.
    pub system_prompt: String,
    /// Replies are cut off at this many output tokens.
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl LlmConfig {
    /// Build config from environment variables.
    ///
    /// Fails only when `GOOGLE_API_KEY` is missing or a numeric override does
    /// not parse; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GOOGLE_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GOOGLE_API_KEY".to_string()))?;

        let model =
            std::env::var("LEAD_ASSIST_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());

        let base_url = std::env::var("LEAD_ASSIST_LLM_BASE_URL")
            .unwrap_or_else(|_| gemini::DEFAULT_BASE_URL.to_string());

        let system_prompt = std::env::var("LEAD_ASSIST_SYSTEM_PROMPT")
            .unwrap_or_else(|_| DEFAULT_SYSTEM_PROMPT.to_string());

        let max_output_tokens = match std::env::var("LEAD_ASSIST_MAX_OUTPUT_TOKENS") {
            Ok(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
                key: "LEAD_ASSIST_MAX_OUTPUT_TOKENS".to_string(),
                message: format!("{e}"),
            })?,
            Err(_) => 200,
        };

        Ok(Self {
            backend: LlmBackend::Gemini,
            api_key: SecretString::from(api_key),
            model,
            base_url,
            system_prompt,
            max_output_tokens,
            temperature: 0.7,
        })
    }

    /// Wrap a visitor conversation with the system prompt and output limits.
    pub fn request_for(&self, history: Vec<ChatMessage>) -> CompletionRequest {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(&self.system_prompt));
        messages.extend(history);
        CompletionRequest::new(messages)
            .with_max_tokens(self.max_output_tokens)
            .with_temperature(self.temperature)
    }
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    match config.backend {
        LlmBackend::Gemini => {
            tracing::info!("Using Gemini (model: {})", config.model);
            Ok(Arc::new(GeminiProvider::with_base_url(
                config.api_key.clone(),
                &config.model,
                &config.base_url,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LlmConfig {
        LlmConfig {
            backend: LlmBackend::Gemini,
            api_key: SecretString::from("test-key"),
            model: "gemini-1.5-flash".to_string(),
            base_url: gemini::DEFAULT_BASE_URL.to_string(),
            system_prompt: "Be brief.".to_string(),
            max_output_tokens: 200,
            temperature: 0.7,
        }
    }

    #[test]
    fn test_create_provider_constructs_without_network() {
        let provider = create_provider(&config());
        assert!(provider.is_ok());
        assert_eq!(provider.unwrap().model_name(), "gemini-1.5-flash");
    }

    #[test]
    fn request_for_prepends_system_prompt() {
        let request = config().request_for(vec![ChatMessage::user("What do you build?")]);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0], ChatMessage::system("Be brief."));
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.max_tokens, Some(200));
        assert_eq!(request.temperature, Some(0.7));
    }
}
