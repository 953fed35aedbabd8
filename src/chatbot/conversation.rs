//! Conversation host: runs the reducer and carries out its effects.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::collaborators::{AiResponder, LeadSubmitter};
use super::model::{LeadDraft, Message, Transcript};
use super::prompts::{AI_FALLBACK, GREETING, SUBMIT_FAILED, SUBMIT_OK};
use super::state::ConversationState;
use super::transition::{Effect, transition};

/// Outcome of one `handle_input` call.
///
/// Collaborator calls run on their own tasks; their results land in the
/// transcript whenever they resolve. `settle` waits for them.
#[derive(Debug)]
pub struct Turn {
    pub state: ConversationState,
    pub pending: Vec<JoinHandle<()>>,
}

impl Turn {
    /// Wait for every collaborator call started in this turn.
    pub async fn settle(self) -> ConversationState {
        for result in futures::future::join_all(self.pending).await {
            if let Err(e) = result {
                warn!("Collaborator task failed: {e}");
            }
        }
        self.state
    }
}

/// One visitor's chat: state, partial lead, transcript and the services it
/// calls out to.
pub struct Conversation {
    state: ConversationState,
    draft: LeadDraft,
    transcript: Transcript,
    ai: Arc<dyn AiResponder>,
    submitter: Arc<dyn LeadSubmitter>,
}

impl Conversation {
    /// Start a conversation whose transcript holds the greeting.
    pub async fn new(ai: Arc<dyn AiResponder>, submitter: Arc<dyn LeadSubmitter>) -> Self {
        let transcript = Transcript::new();
        transcript.push(Message::bot(GREETING)).await;
        Self {
            state: ConversationState::default(),
            draft: LeadDraft::default(),
            transcript,
            ai,
            submitter,
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn draft(&self) -> &LeadDraft {
        &self.draft
    }

    /// Shared handle on the transcript.
    pub fn transcript(&self) -> Transcript {
        self.transcript.clone()
    }

    /// Process one visitor input.
    ///
    /// Whitespace-only input is ignored. Otherwise the input is echoed to the
    /// transcript, the reducer runs, and its effects execute in order.
    pub async fn handle_input(&mut self, input: &str) -> Turn {
        let result = match transition(self.state, &self.draft, input) {
            Ok(result) => result,
            Err(e) => {
                debug!("Ignoring input: {e}");
                return Turn {
                    state: self.state,
                    pending: Vec::new(),
                };
            }
        };

        self.transcript.push(Message::user(input.trim())).await;

        if result.new_state != self.state {
            debug!(from = %self.state, to = %result.new_state, "Conversation transition");
        }
        self.state = result.new_state;

        let mut pending = Vec::new();
        for effect in result.effects {
            match effect {
                Effect::Reply(text) => self.transcript.push(Message::bot(text)).await,
                Effect::Reject(error) => {
                    self.transcript.push(Message::bot(error.to_string())).await
                }
                Effect::Store { field, value } => self.draft.set(field, value),
                Effect::AskAi { text } => pending.push(self.spawn_ai(text)),
                Effect::SubmitLead { record, source } => {
                    let submitter = self.submitter.clone();
                    let transcript = self.transcript.clone();
                    pending.push(tokio::spawn(async move {
                        let reply = match submitter.submit(&record, source).await {
                            Ok(true) => {
                                info!(source = %source, "Lead submitted");
                                SUBMIT_OK
                            }
                            Ok(false) => {
                                warn!(source = %source, "Lead submission declined");
                                SUBMIT_FAILED
                            }
                            Err(e) => {
                                warn!(source = %source, "Lead submission failed: {e}");
                                SUBMIT_FAILED
                            }
                        };
                        transcript.push(Message::bot(reply)).await;
                    }));
                }
                Effect::ResetLead => self.draft = LeadDraft::default(),
            }
        }

        Turn {
            state: self.state,
            pending,
        }
    }

    fn spawn_ai(&self, text: String) -> JoinHandle<()> {
        let ai = self.ai.clone();
        let transcript = self.transcript.clone();
        tokio::spawn(async move {
            let reply = match ai.ask(&text).await {
                Ok(reply) => reply,
                Err(e) => {
                    warn!("AI reply failed: {e}");
                    AI_FALLBACK.to_string()
                }
            };
            transcript.push(Message::bot(reply)).await;
        })
    }
}
