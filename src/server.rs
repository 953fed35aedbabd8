//! HTTP server assembly.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::chatbot::{
    AiResponder, ChatRouteState, LeadSubmitter, MailLeadSubmitter, SessionStore, Unconfigured,
    chat_routes,
};
use crate::config::ServerConfig;
use crate::enquiry::{EnquiryRouteState, MailSender, enquiry_routes};
use crate::llm::CompanyAssistant;
use crate::proxy::{ProxyRouteState, proxy_routes};

/// The backends the routes share. Either may be missing; the affected
/// endpoints then answer with a server error.
#[derive(Clone)]
pub struct Services {
    pub assistant: Option<CompanyAssistant>,
    pub mailer: Option<Arc<dyn MailSender>>,
    pub sessions: Arc<SessionStore>,
}

impl Services {
    pub fn new(
        assistant: Option<CompanyAssistant>,
        mailer: Option<Arc<dyn MailSender>>,
        config: &ServerConfig,
    ) -> Self {
        let ai: Arc<dyn AiResponder> = match &assistant {
            Some(assistant) => Arc::new(assistant.clone()),
            None => Arc::new(Unconfigured),
        };
        let submitter: Arc<dyn LeadSubmitter> = match &mailer {
            Some(mailer) => Arc::new(MailLeadSubmitter::new(mailer.clone())),
            None => Arc::new(Unconfigured),
        };
        let sessions = Arc::new(SessionStore::new(ai, submitter, config.session_idle_timeout));

        Self {
            assistant,
            mailer,
            sessions,
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Every route the service exposes.
pub fn router(services: &Services) -> Router {
    proxy_routes(ProxyRouteState {
        assistant: services.assistant.clone(),
    })
    .merge(enquiry_routes(EnquiryRouteState {
        mailer: services.mailer.clone(),
    }))
    .merge(chat_routes(ChatRouteState {
        sessions: services.sessions.clone(),
    }))
    .route("/health", get(health))
    .layer(CorsLayer::permissive())
}

/// Serve `router` on `listener` until the process exits.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Lead Assist listening");
    }
    axum::serve(listener, router).await
}
