//! The two external services the conversation consults: the AI reply service
//! and the lead submission service.
//!
//! Each has an HTTP client (used by widgets talking to a running server) and
//! an in-process implementation (used by server-hosted sessions).

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::model::LeadRecord;
use crate::enquiry::{EnquiryRequest, EnquiryResponse, EnquiryType, MailSender, dispatch_enquiry};
use crate::error::{EnquiryError, LlmError};
use crate::llm::{ChatMessage, CompanyAssistant};

/// Answers a free-form visitor question.
#[async_trait]
pub trait AiResponder: Send + Sync {
    async fn ask(&self, text: &str) -> Result<String, LlmError>;
}

/// Delivers a completed lead. `Ok(false)` means the service declined it.
#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    async fn submit(&self, record: &LeadRecord, source: EnquiryType) -> Result<bool, EnquiryError>;
}

// ── HTTP clients ────────────────────────────────────────────────────

/// Calls `POST {base_url}/api/chatbot`.
#[derive(Clone)]
pub struct HttpAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Accepts both `{reply}` and the older `{text}` body.
#[derive(Debug, Deserialize)]
struct ChatbotBody {
    reply: Option<String>,
    text: Option<String>,
}

#[async_trait]
impl AiResponder for HttpAiClient {
    async fn ask(&self, text: &str) -> Result<String, LlmError> {
        let resp = self
            .client
            .post(format!("{}/api/chatbot", self.base_url))
            .json(&serde_json::json!({ "message": text }))
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: "chatbot-api".into(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LlmError::RequestFailed {
                provider: "chatbot-api".into(),
                reason: format!("HTTP {status}"),
            });
        }

        let body: ChatbotBody = resp.json().await.map_err(|e| LlmError::InvalidResponse {
            provider: "chatbot-api".into(),
            reason: e.to_string(),
        })?;

        body.reply
            .or(body.text)
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: "chatbot-api".into(),
                reason: "response has no reply".into(),
            })
    }
}

/// Calls `POST {base_url}/api/enquiry`.
#[derive(Clone)]
pub struct HttpEnquiryClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEnquiryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LeadSubmitter for HttpEnquiryClient {
    async fn submit(&self, record: &LeadRecord, source: EnquiryType) -> Result<bool, EnquiryError> {
        let body = EnquiryRequest::from_lead(record, source);
        let resp = self
            .client
            .post(format!("{}/api/enquiry", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| EnquiryError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EnquiryError::Rejected {
                status: status.as_u16(),
            });
        }

        let parsed: EnquiryResponse = resp
            .json()
            .await
            .map_err(|e| EnquiryError::Http(e.to_string()))?;
        Ok(parsed.success)
    }
}

// ── In-process implementations ──────────────────────────────────────

#[async_trait]
impl AiResponder for CompanyAssistant {
    async fn ask(&self, text: &str) -> Result<String, LlmError> {
        self.reply(vec![ChatMessage::user(text)]).await
    }
}

/// Sends leads straight through the mail relay.
pub struct MailLeadSubmitter {
    mailer: Arc<dyn MailSender>,
}

impl MailLeadSubmitter {
    pub fn new(mailer: Arc<dyn MailSender>) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl LeadSubmitter for MailLeadSubmitter {
    async fn submit(&self, record: &LeadRecord, source: EnquiryType) -> Result<bool, EnquiryError> {
        let req = EnquiryRequest::from_lead(record, source);
        dispatch_enquiry(Some(self.mailer.as_ref()), &req).await?;
        Ok(true)
    }
}

/// Stand-in when a backend is not configured. Every call fails, so the
/// conversation falls back to its apology messages.
pub struct Unconfigured;

#[async_trait]
impl AiResponder for Unconfigured {
    async fn ask(&self, _text: &str) -> Result<String, LlmError> {
        Err(LlmError::NotConfigured)
    }
}

#[async_trait]
impl LeadSubmitter for Unconfigured {
    async fn submit(&self, _record: &LeadRecord, _source: EnquiryType) -> Result<bool, EnquiryError> {
        Err(EnquiryError::Mail(crate::error::MailError::NotConfigured))
    }
}
