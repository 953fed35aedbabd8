//! Field validators for the lead form and the popup contact form.
//!
//! Pure predicates with no state, shared by the chatbot and the enquiry
//! endpoint's server-side checks.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10,15}$").unwrap());

static POPUP_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Minimum trimmed length of a popup-form message.
const POPUP_MIN_MESSAGE_CHARS: usize = 5;

/// At least two characters once surrounding whitespace is removed.
pub fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() >= 2
}

/// One `@`, non-empty local and domain parts, and a dot inside the domain.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// 10 to 15 ASCII digits, nothing else (no `+`, spaces or punctuation).
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// The project types offered by the chatbot's selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile App Development")]
    MobileAppDevelopment,
    #[serde(rename = "Game App Development")]
    GameAppDevelopment,
    #[serde(rename = "UI/UX Design")]
    UiUxDesign,
    #[serde(rename = "Idea Based Website Development")]
    IdeaBasedWebsiteDevelopment,
    #[serde(rename = "E-commerce Development")]
    EcommerceDevelopment,
    #[serde(rename = "Others")]
    Others,
}

impl ProjectType {
    /// Every option, in the order the widget lists them.
    pub const ALL: [ProjectType; 7] = [
        Self::WebDevelopment,
        Self::MobileAppDevelopment,
        Self::GameAppDevelopment,
        Self::UiUxDesign,
        Self::IdeaBasedWebsiteDevelopment,
        Self::EcommerceDevelopment,
        Self::Others,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::WebDevelopment => "Web Development",
            Self::MobileAppDevelopment => "Mobile App Development",
            Self::GameAppDevelopment => "Game App Development",
            Self::UiUxDesign => "UI/UX Design",
            Self::IdeaBasedWebsiteDevelopment => "Idea Based Website Development",
            Self::EcommerceDevelopment => "E-commerce Development",
            Self::Others => "Others",
        }
    }

    /// Match a selection against the option labels, ignoring case and
    /// surrounding whitespace.
    pub fn parse(selection: &str) -> Option<ProjectType> {
        let selection = selection.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(selection))
    }

    /// Option labels for display.
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(ProjectType::label).collect()
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Name, email and phone checks shared by every lead source.
pub fn validate_contact(name: &str, email: &str, phone: &str) -> Result<(), ValidationError> {
    if !is_valid_name(name) {
        return Err(ValidationError::InvalidName);
    }
    if !is_valid_email(email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_valid_phone(phone.trim()) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

/// The popup contact form's rules: exactly 10 phone digits and a message of
/// at least five characters.
pub fn validate_popup(
    name: &str,
    email: &str,
    phone: &str,
    message: &str,
) -> Result<(), ValidationError> {
    if !is_valid_name(name) {
        return Err(ValidationError::InvalidName);
    }
    if !is_valid_email(email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    if !POPUP_PHONE_RE.is_match(phone.trim()) {
        return Err(ValidationError::InvalidPhone);
    }
    if message.trim().chars().count() < POPUP_MIN_MESSAGE_CHARS {
        return Err(ValidationError::InvalidMessage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_rejected() {
        for name in ["", " ", "a", "  b  ", "\tx\n", "é"] {
            assert!(!is_valid_name(name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn two_character_names_are_accepted() {
        for name in ["Al", "  Jo ", "Asha", "李明"] {
            assert!(is_valid_name(name), "{name:?} should be accepted");
        }
    }

    #[test]
    fn well_formed_emails_are_accepted() {
        for email in ["asha@x.com", "a.b+c@sub.domain.io", "x@y.z", "first_last@co.in"] {
            assert!(is_valid_email(email), "{email:?} should be accepted");
        }
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in [
            "not-an-email",
            "@x.com",
            "asha@",
            "asha@com",
            "asha@@x.com",
            "as ha@x.com",
            "asha@x .com",
            "asha@x.",
            "",
        ] {
            assert!(!is_valid_email(email), "{email:?} should be rejected");
        }
    }

    #[test]
    fn phone_length_bounds() {
        assert!(!is_valid_phone("123456789"));
        assert!(is_valid_phone("1234567890"));
        assert!(is_valid_phone("123456789012345"));
        assert!(!is_valid_phone("1234567890123456"));
    }

    #[test]
    fn phone_rejects_non_digits() {
        for phone in ["+919876543210", "98765 43210", "987-654-3210", "98765432a0", "٩٨٧٦٥٤٣٢١٠"] {
            assert!(!is_valid_phone(phone), "{phone:?} should be rejected");
        }
    }

    #[test]
    fn project_type_parse_is_case_insensitive() {
        assert_eq!(
            ProjectType::parse("web development"),
            Some(ProjectType::WebDevelopment)
        );
        assert_eq!(ProjectType::parse(" UI/UX Design "), Some(ProjectType::UiUxDesign));
        assert_eq!(ProjectType::parse("others"), Some(ProjectType::Others));
        assert_eq!(ProjectType::parse("Blockchain"), None);
        assert_eq!(ProjectType::parse(""), None);
    }

    #[test]
    fn project_labels_round_trip_through_parse() {
        assert_eq!(ProjectType::labels().len(), 7);
        for project in ProjectType::ALL {
            assert_eq!(ProjectType::parse(project.label()), Some(project));
            let json = serde_json::to_string(&project).unwrap();
            assert_eq!(json, format!("\"{project}\""));
        }
    }

    #[test]
    fn validate_contact_reports_first_failure() {
        assert_eq!(validate_contact("Asha", "asha@x.com", "9876543210"), Ok(()));
        assert_eq!(
            validate_contact("A", "bad", "1"),
            Err(ValidationError::InvalidName)
        );
        assert_eq!(
            validate_contact("Asha", "bad", "1"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_contact("Asha", "asha@x.com", "1"),
            Err(ValidationError::InvalidPhone)
        );
    }

    #[test]
    fn popup_requires_exactly_ten_digits_and_a_message() {
        assert_eq!(
            validate_popup("Asha", "asha@x.com", "9876543210", "Hello there"),
            Ok(())
        );
        assert_eq!(
            validate_popup("Asha", "asha@x.com", "98765432101", "Hello there"),
            Err(ValidationError::InvalidPhone)
        );
        assert_eq!(
            validate_popup("Asha", "asha@x.com", "9876543210", " hi  "),
            Err(ValidationError::InvalidMessage)
        );
    }
}
