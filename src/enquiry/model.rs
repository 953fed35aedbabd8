//! Enquiry wire types shared by the endpoint and its HTTP client.

use serde::{Deserialize, Serialize};

use crate::chatbot::model::LeadRecord;
use crate::chatbot::validate::{validate_contact, validate_popup};
use crate::error::{EnquiryError, ValidationError};

/// Where an enquiry came from. Each source gets its own mail template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryType {
    Contact,
    Popup,
    Chatbot,
}

impl EnquiryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Popup => "popup",
            Self::Chatbot => "chatbot",
        }
    }

    /// Display name on the From header.
    pub fn sender_name(&self) -> &'static str {
        match self {
            Self::Contact => "contact-us Enquiry",
            Self::Popup => "Pop-up query",
            Self::Chatbot => "ChatBot Enquiry",
        }
    }

    pub fn subject(&self) -> &'static str {
        match self {
            Self::Contact => "New contact-us Enquiry",
            Self::Popup => "New Pop-up query",
            Self::Chatbot => "New ChatBot Enquiry",
        }
    }

    /// Heading at the top of the mail body.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Contact => "New contact-us Enquiry",
            Self::Popup => "New Pop-up Chat Enquiry",
            Self::Chatbot => "New Chat Enquiry",
        }
    }

    /// The popup form has no project field.
    pub fn includes_project(&self) -> bool {
        !matches!(self, Self::Popup)
    }
}

impl std::str::FromStr for EnquiryType {
    type Err = EnquiryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contact" => Ok(Self::Contact),
            "popup" => Ok(Self::Popup),
            "chatbot" => Ok(Self::Chatbot),
            other => Err(EnquiryError::InvalidType(other.to_string())),
        }
    }
}

impl std::fmt::Display for EnquiryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/enquiry`.
///
/// `type` is kept as a raw string so an unknown value can be answered with
/// the endpoint's own error instead of a deserialization rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnquiryRequest {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EnquiryRequest {
    /// Build the request for a lead gathered by the chatbot or another source.
    pub fn from_lead(record: &LeadRecord, source: EnquiryType) -> Self {
        Self {
            kind: source.as_str().to_string(),
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            project: Some(record.project_type.clone()),
            message: Some(record.message.clone()),
        }
    }

    pub fn enquiry_type(&self) -> Result<EnquiryType, EnquiryError> {
        self.kind.parse()
    }

    /// Server-side mirror of the client checks for the given source.
    pub fn validate(&self, kind: EnquiryType) -> Result<(), ValidationError> {
        match kind {
            EnquiryType::Popup => validate_popup(
                &self.name,
                &self.email,
                &self.phone,
                self.message.as_deref().unwrap_or_default(),
            ),
            EnquiryType::Contact | EnquiryType::Chatbot => {
                validate_contact(&self.name, &self.email, &self.phone)
            }
        }
    }
}

/// Body returned by `POST /api/enquiry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnquiryResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl EnquiryResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: "Email sent successfully".to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
