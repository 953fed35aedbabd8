//! Enquiry mail: HTML formatting and SMTP delivery via lettre.

use async_trait::async_trait;
use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, Message, SmtpTransport, Transport};
use secrecy::{ExposeSecret, SecretString};

use super::model::{EnquiryRequest, EnquiryType};
use crate::error::MailError;

// ── Configuration ───────────────────────────────────────────────────

/// SMTP relay configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    /// Inbox that receives every enquiry.
    pub recipient: String,
}

impl SmtpConfig {
    /// Build config from environment variables.
    /// Returns `None` if `SMTP_USER` or `SMTP_PASS` is not set (mail disabled).
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("SMTP_USER").ok()?;
        let password = std::env::var("SMTP_PASS").ok()?;

        let host = std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());

        let port: u16 = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);

        let recipient = std::env::var("ENQUIRY_RECIPIENT").unwrap_or_else(|_| username.clone());

        Some(Self {
            host,
            port,
            username,
            password: SecretString::from(password),
            recipient,
        })
    }

    /// Port 465 speaks TLS from the first byte; anything else upgrades with STARTTLS.
    fn implicit_tls(&self) -> bool {
        self.port == 465
    }
}

// ── Formatting ──────────────────────────────────────────────────────

/// A formatted enquiry mail. Addresses are filled in by the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnquiryMail {
    pub from_name: String,
    pub subject: String,
    pub html: String,
}

/// Format an enquiry with the template for its source.
pub fn compose(kind: EnquiryType, req: &EnquiryRequest) -> EnquiryMail {
    let mut html = format!("<h2>{}</h2>\n", kind.heading());
    let mut row = |label: &str, value: &str| {
        html.push_str(&format!("<p><b>{label}:</b> {}</p>\n", escape_html(value)));
    };

    row("Name", &req.name);
    row("Email", &req.email);
    row("Phone", &req.phone);
    if kind.includes_project() {
        row("Project", or_na(req.project.as_deref()));
    }
    row("Message", or_na(req.message.as_deref()));

    EnquiryMail {
        from_name: kind.sender_name().to_string(),
        subject: kind.subject().to_string(),
        html,
    }
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "N/A",
    }
}

/// Escape the characters that matter inside HTML text and attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// ── Delivery ────────────────────────────────────────────────────────

/// Something that can deliver an enquiry mail to the company inbox.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, mail: EnquiryMail) -> Result<(), MailError>;
}

/// SMTP relay sender backed by lettre's blocking transport.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SmtpConfig {
        &self.config
    }
}

#[async_trait]
impl MailSender for SmtpMailer {
    async fn send(&self, mail: EnquiryMail) -> Result<(), MailError> {
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || send_blocking(&config, &mail))
            .await
            .map_err(|e| MailError::Transport(format!("mail task failed: {e}")))?
    }
}

/// Build the message for `mail` with the configured sender and recipient.
pub fn build_message(config: &SmtpConfig, mail: &EnquiryMail) -> Result<Message, MailError> {
    let from_address: Address = config.username.parse().map_err(|e: AddressError| {
        MailError::InvalidAddress {
            address: config.username.clone(),
            reason: e.to_string(),
        }
    })?;
    let to: Mailbox = config.recipient.parse().map_err(|e: AddressError| {
        MailError::InvalidAddress {
            address: config.recipient.clone(),
            reason: e.to_string(),
        }
    })?;

    Message::builder()
        .from(Mailbox::new(Some(mail.from_name.clone()), from_address))
        .to(to)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(mail.html.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

fn send_blocking(config: &SmtpConfig, mail: &EnquiryMail) -> Result<(), MailError> {
    let message = build_message(config, mail)?;

    let creds = Credentials::new(
        config.username.clone(),
        config.password.expose_secret().to_string(),
    );

    let builder = if config.implicit_tls() {
        SmtpTransport::relay(&config.host)
    } else {
        SmtpTransport::starttls_relay(&config.host)
    }
    .map_err(|e| MailError::Transport(format!("SMTP relay error: {e}")))?;

    let transport = builder.port(config.port).credentials(creds).build();

    transport
        .send(&message)
        .map_err(|e| MailError::Transport(e.to_string()))?;

    tracing::info!(subject = %mail.subject, "Enquiry email sent");
    Ok(())
}
