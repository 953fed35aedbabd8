//! In-memory registry of server-hosted conversations.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use super::collaborators::{AiResponder, LeadSubmitter};
use super::conversation::Conversation;
use super::model::Message;
use super::state::ConversationState;
use super::validate::ProjectType;
use crate::error::SessionError;

/// A conversation plus the time it last received input.
pub struct Session {
    pub id: Uuid,
    conversation: Mutex<Conversation>,
    last_active: Mutex<DateTime<Utc>>,
}

impl Session {
    /// Run one visitor input. Inputs on the same session are serialized.
    pub async fn handle_input(&self, text: &str) -> SessionView {
        let mut conversation = self.conversation.lock().await;
        *self.last_active.lock().await = Utc::now();
        // Collaborator tasks keep running after their handles are dropped.
        let _turn = conversation.handle_input(text).await;
        SessionView::of(self.id, &conversation).await
    }

    pub async fn view(&self) -> SessionView {
        let conversation = self.conversation.lock().await;
        SessionView::of(self.id, &conversation).await
    }

    async fn idle_since(&self) -> DateTime<Utc> {
        *self.last_active.lock().await
    }
}

/// JSON snapshot of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub state: ConversationState,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_options: Option<Vec<&'static str>>,
}

impl SessionView {
    async fn of(id: Uuid, conversation: &Conversation) -> Self {
        let state = conversation.state();
        Self {
            id,
            state,
            messages: conversation.transcript().snapshot().await,
            project_options: (state == ConversationState::CollectingProject)
                .then(ProjectType::labels),
        }
    }
}

/// Creates, looks up and expires sessions. Every session shares the same
/// collaborators.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Session>>>,
    ai: Arc<dyn AiResponder>,
    submitter: Arc<dyn LeadSubmitter>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(
        ai: Arc<dyn AiResponder>,
        submitter: Arc<dyn LeadSubmitter>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ai,
            submitter,
            idle_timeout,
        }
    }

    pub async fn create(&self) -> Arc<Session> {
        let conversation = Conversation::new(self.ai.clone(), self.submitter.clone()).await;
        let session = Arc::new(Session {
            id: Uuid::new_v4(),
            conversation: Mutex::new(conversation),
            last_active: Mutex::new(Utc::now()),
        });
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        info!(session_id = %session.id, "Chat session created");
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<Session>, SessionError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                debug!(session_id = %id, "Chat session closed");
                Ok(())
            }
            None => Err(SessionError::NotFound(id)),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop sessions idle longer than the timeout. Returns how many went.
    pub async fn expire_idle(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let mut expired = Vec::new();
        for (id, session) in sessions.iter() {
            let idle = now
                .signed_duration_since(session.idle_since().await)
                .to_std()
                .unwrap_or_default();
            if idle > self.idle_timeout {
                expired.push(*id);
            }
        }
        for id in &expired {
            sessions.remove(id);
            debug!(session_id = %id, "Chat session expired");
        }

        if !expired.is_empty() {
            info!(count = expired.len(), "Expired idle chat sessions");
        }
        expired.len()
    }
}

/// Spawn a background task that periodically drops idle sessions.
pub fn spawn_expiry_task(store: Arc<SessionStore>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            store.expire_idle().await;
        }
    })
}
