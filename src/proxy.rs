//! AI proxy endpoint: forwards a visitor message to the LLM and returns the
//! reply.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::llm::{ChatMessage, CompanyAssistant};

/// One prior turn supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub text: String,
}

impl HistoryEntry {
    fn into_chat_message(self) -> ChatMessage {
        if self.from == "user" {
            ChatMessage::user(&self.text)
        } else {
            ChatMessage::assistant(&self.text)
        }
    }
}

/// The `message` field: a plain string, one history entry, or a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProxyMessage {
    Text(String),
    Entry(HistoryEntry),
    History(Vec<HistoryEntry>),
}

impl ProxyMessage {
    /// Chat history with blank entries removed.
    pub fn into_history(self) -> Vec<ChatMessage> {
        let messages = match self {
            ProxyMessage::Text(text) => vec![ChatMessage::user(&text)],
            ProxyMessage::Entry(entry) => vec![entry.into_chat_message()],
            ProxyMessage::History(entries) => entries
                .into_iter()
                .map(HistoryEntry::into_chat_message)
                .collect(),
        };
        messages
            .into_iter()
            .filter(|m| !m.content.trim().is_empty())
            .collect()
    }
}

/// Body of `POST /api/chatbot`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyRequest {
    #[serde(default)]
    pub message: Option<ProxyMessage>,
}

/// Successful body of `POST /api/chatbot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyReply {
    pub reply: String,
}

/// Shared state for the proxy route.
#[derive(Clone)]
pub struct ProxyRouteState {
    /// None if no API key is configured.
    pub assistant: Option<CompanyAssistant>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// POST /api/chatbot
async fn chatbot_reply(
    State(state): State<ProxyRouteState>,
    body: Result<Json<ProxyRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            debug!("Unreadable chatbot request: {rejection}");
            return error_response(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    let history = req
        .message
        .map(ProxyMessage::into_history)
        .unwrap_or_default();
    if history.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No message provided");
    }

    let Some(assistant) = state.assistant else {
        error!("Chatbot request received but no LLM is configured");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate text");
    };

    debug!(turns = history.len(), model = assistant.model_name(), "Forwarding to LLM");
    match assistant.reply(history).await {
        Ok(reply) => Json(ProxyReply { reply }).into_response(),
        Err(e) => {
            error!("Chatbot API error: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate text")
        }
    }
}

/// Build the AI proxy route.
pub fn proxy_routes(state: ProxyRouteState) -> Router {
    Router::new()
        .route("/api/chatbot", post(chatbot_reply))
        .with_state(state)
}
