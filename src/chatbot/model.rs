//! Transcript and lead data models.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Bot,
    User,
}

/// One entry in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }
}

/// Append-only chat transcript.
///
/// Cloning shares the underlying log, so a collaborator task spawned during a
/// turn can append its result whenever it resolves.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Arc<RwLock<Vec<Message>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, message: Message) {
        self.entries.write().await.push(message);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Copy of the whole log in display order.
    pub async fn snapshot(&self) -> Vec<Message> {
        self.entries.read().await.clone()
    }

    /// Entries appended after the first `from` ones.
    pub async fn since(&self, from: usize) -> Vec<Message> {
        let entries = self.entries.read().await;
        entries.iter().skip(from).cloned().collect()
    }
}

/// The lead fields gathered by the form steps, in collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Name,
    Email,
    Phone,
    ProjectType,
    Message,
}

/// A completed lead, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project_type: String,
    pub message: String,
}

/// A lead under construction. Fields are only set once they pass validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub project_type: Option<String>,
    pub message: Option<String>,
}

impl LeadDraft {
    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            LeadField::Name => self.name = value,
            LeadField::Email => self.email = value,
            LeadField::Phone => self.phone = value,
            LeadField::ProjectType => self.project_type = value,
            LeadField::Message => self.message = value,
        }
    }

    pub fn get(&self, field: LeadField) -> Option<&str> {
        match field {
            LeadField::Name => self.name.as_deref(),
            LeadField::Email => self.email.as_deref(),
            LeadField::Phone => self.phone.as_deref(),
            LeadField::ProjectType => self.project_type.as_deref(),
            LeadField::Message => self.message.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build the submittable record, or `None` while any field is missing.
    pub fn to_record(&self) -> Option<LeadRecord> {
        Some(LeadRecord {
            name: self.name.clone()?,
            email: self.email.clone()?,
            phone: self.phone.clone()?,
            project_type: self.project_type.clone()?,
            message: self.message.clone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> LeadDraft {
        let mut draft = LeadDraft::default();
        draft.set(LeadField::Name, "Asha");
        draft.set(LeadField::Email, "asha@x.com");
        draft.set(LeadField::Phone, "9876543210");
        draft.set(LeadField::ProjectType, "Web Development");
        draft.set(LeadField::Message, "Need a site");
        draft
    }

    #[test]
    fn draft_is_incomplete_until_every_field_is_set() {
        let mut draft = LeadDraft::default();
        assert!(draft.is_empty());
        assert!(draft.to_record().is_none());

        draft.set(LeadField::Name, "Asha");
        draft.set(LeadField::Email, "asha@x.com");
        draft.set(LeadField::Phone, "9876543210");
        draft.set(LeadField::ProjectType, "Web Development");
        assert!(!draft.is_empty());
        assert!(draft.to_record().is_none());

        draft.set(LeadField::Message, "Need a site");
        let record = draft.to_record().unwrap();
        assert_eq!(record.name, "Asha");
        assert_eq!(record.project_type, "Web Development");
    }

    #[test]
    fn get_reads_back_set_fields() {
        let draft = full_draft();
        assert_eq!(draft.get(LeadField::Phone), Some("9876543210"));
        assert_eq!(LeadDraft::default().get(LeadField::Email), None);
    }

    #[test]
    fn record_serializes_project_type_in_camel_case() {
        let record = full_draft().to_record().unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["projectType"], "Web Development");
        assert!(json.get("project_type").is_none());
    }

    #[test]
    fn message_serializes_sender_lowercase() {
        let json = serde_json::to_value(Message::bot("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"sender": "bot", "text": "hi"}));
    }

    #[tokio::test]
    async fn transcript_clones_share_the_log() {
        let transcript = Transcript::new();
        let handle = transcript.clone();
        transcript.push(Message::bot("Hello")).await;
        handle.push(Message::user("hi")).await;

        assert_eq!(transcript.len().await, 2);
        let since = transcript.since(1).await;
        assert_eq!(since, vec![Message::user("hi")]);
    }
}
