//! Error types for Lead Assist.

use uuid::Uuid;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Enquiry error: {0}")]
    Enquiry(#[from] EnquiryError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Field validation failures.
///
/// The display text is shown verbatim to the visitor as the inline chat error,
/// so keep it user-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("❌ Please enter a valid name (at least 2 characters).")]
    InvalidName,

    #[error("❌ That doesn't look like a valid email. Try again:")]
    InvalidEmail,

    #[error("❌ Please enter a valid phone number (10–15 digits).")]
    InvalidPhone,

    #[error("❌ Please select a project type.")]
    InvalidProjectSelection,

    #[error("Enter a valid message.")]
    InvalidMessage,
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("No LLM provider configured")]
    NotConfigured,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outbound mail errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("SMTP is not configured (set SMTP_USER and SMTP_PASS)")]
    NotConfigured,

    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("SMTP send failed: {0}")]
    Transport(String),
}

/// Enquiry submission errors, both server- and client-side.
#[derive(Debug, thiserror::Error)]
pub enum EnquiryError {
    #[error("Invalid enquiry type: {0}")]
    InvalidType(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Enquiry endpoint rejected the submission with status {status}")]
    Rejected { status: u16 },
}

/// Chat session errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session {0} not found")]
    NotFound(Uuid),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
