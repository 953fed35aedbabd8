//! CompanyAssistant: answers visitor questions with the configured system
//! prompt and output limits.

use std::sync::Arc;

use super::provider::{ChatMessage, LlmProvider};
use super::LlmConfig;
use crate::error::LlmError;

/// Reply used when the model returns no text.
pub const EMPTY_REPLY: &str = "Sorry, I couldn't generate a response.";

/// A configured LLM plus the prompt framing the site uses for every question.
#[derive(Clone)]
pub struct CompanyAssistant {
    llm: Arc<dyn LlmProvider>,
    config: Arc<LlmConfig>,
}

impl CompanyAssistant {
    pub fn new(llm: Arc<dyn LlmProvider>, config: LlmConfig) -> Self {
        Self {
            llm,
            config: Arc::new(config),
        }
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Answer the last visitor message given the conversation so far.
    pub async fn reply(&self, history: Vec<ChatMessage>) -> Result<String, LlmError> {
        let request = self.config.request_for(history);
        let response = self.llm.complete(request).await?;
        let text = response.content.trim();
        if text.is_empty() {
            tracing::warn!(
                finish_reason = ?response.finish_reason,
                "Model returned no text"
            );
            return Ok(EMPTY_REPLY.to_string());
        }
        Ok(text.to_string())
    }
}
