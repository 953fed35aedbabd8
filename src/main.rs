use std::sync::Arc;

use lead_assist::chatbot::sessions;
use lead_assist::config::ServerConfig;
use lead_assist::enquiry::{MailSender, SmtpConfig, SmtpMailer};
use lead_assist::error::Result;
use lead_assist::llm::{CompanyAssistant, LlmConfig, create_provider};
use lead_assist::server::{self, Services};

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider before any TLS usage. Err only means one
    // is already installed.
    let _ = rustls::crypto::ring::default_provider().install_default();

    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    let _log_guard = lead_assist::logging::init(config.log_dir.as_deref())?;

    tracing::info!("Lead Assist v{}", env!("CARGO_PKG_VERSION"));

    // ── LLM ─────────────────────────────────────────────────────────────
    let assistant = match LlmConfig::from_env() {
        Ok(llm_config) => {
            let llm = create_provider(&llm_config)?;
            Some(CompanyAssistant::new(llm, llm_config))
        }
        Err(e) => {
            tracing::warn!("AI replies disabled: {e}");
            None
        }
    };

    // ── Mail ────────────────────────────────────────────────────────────
    let mailer: Option<Arc<dyn MailSender>> = match SmtpConfig::from_env() {
        Some(smtp) => {
            tracing::info!(host = %smtp.host, port = smtp.port, "Enquiry mail enabled");
            Some(Arc::new(SmtpMailer::new(smtp)))
        }
        None => {
            tracing::warn!("Enquiry mail disabled: SMTP_USER / SMTP_PASS not set");
            None
        }
    };

    let services = Services::new(assistant, mailer, &config);
    sessions::spawn_expiry_task(services.sessions.clone(), config.session_sweep_interval);

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    server::serve(listener, server::router(&services)).await?;

    Ok(())
}
