//! Pure transition function for the chatbot conversation.
//!
//! `transition` maps `(state, draft, input)` to the next state plus the
//! effects the host must carry out. It performs no I/O; the host appends bot
//! replies, stores fields and spawns the collaborator calls.

use thiserror::Error;

use super::model::{LeadDraft, LeadField, LeadRecord};
use super::prompts::{self, AI_KEYWORDS, START_KEYWORDS};
use super::state::ConversationState;
use super::validate::{ProjectType, is_valid_email, is_valid_name, is_valid_phone};
use crate::enquiry::EnquiryType;
use crate::error::ValidationError;

/// Effects to be executed after a transition, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a bot message to the transcript.
    Reply(String),

    /// The input failed its validator; show the error inline.
    Reject(ValidationError),

    /// Record a validated field on the lead draft.
    Store { field: LeadField, value: String },

    /// Ask the AI collaborator and append its reply when it resolves.
    AskAi { text: String },

    /// Hand the completed lead to the submission collaborator.
    SubmitLead {
        record: LeadRecord,
        source: EnquiryType,
    },

    /// Discard the lead draft.
    ResetLead,
}

impl Effect {
    pub fn reply(text: impl Into<String>) -> Self {
        Effect::Reply(text.into())
    }

    fn store(field: LeadField, value: impl Into<String>) -> Self {
        Effect::Store {
            field,
            value: value.into(),
        }
    }
}

/// Result of a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub new_state: ConversationState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConversationState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Put `effect` ahead of the prompt so the field is stored before the
    /// next question is shown.
    fn with_effect_first(mut self, effect: Effect) -> Self {
        self.effects.insert(0, effect);
        self
    }

    /// Move to `state` and show its prompt.
    fn enter(state: ConversationState) -> Self {
        let result = Self::new(state);
        match prompts::prompt_for(state) {
            Some(prompt) => result.with_effect(Effect::reply(prompt)),
            None => result,
        }
    }
}

/// Errors that can occur during transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Input is empty")]
    EmptyInput,
}

/// Pure transition function.
///
/// Validation failures leave the state unchanged and produce a single
/// `Effect::Reject`; nothing is stored and no collaborator is called.
pub fn transition(
    state: ConversationState,
    draft: &LeadDraft,
    input: &str,
) -> Result<TransitionResult, TransitionError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TransitionError::EmptyInput);
    }

    let result = match state {
        ConversationState::Greeting => TransitionResult::enter(ConversationState::Freeform),

        ConversationState::Freeform => freeform(input),

        ConversationState::CollectingName => collect(
            state,
            LeadField::Name,
            input,
            is_valid_name(input),
            ValidationError::InvalidName,
        ),

        ConversationState::CollectingEmail => collect(
            state,
            LeadField::Email,
            input,
            is_valid_email(input),
            ValidationError::InvalidEmail,
        ),

        ConversationState::CollectingPhone => collect(
            state,
            LeadField::Phone,
            input,
            is_valid_phone(input),
            ValidationError::InvalidPhone,
        ),

        ConversationState::CollectingProject => match ProjectType::parse(input) {
            Some(project) => TransitionResult::enter(ConversationState::CollectingMessage)
                .with_effect_first(Effect::store(LeadField::ProjectType, project.label())),
            None => reject(state, ValidationError::InvalidProjectSelection),
        },

        ConversationState::CollectingMessage => submit(draft, input),
    };

    debug_assert!(state.can_transition_to(result.new_state));
    Ok(result)
}

/// Keyword routing in free-text mode. The AI keywords are checked before the
/// start keywords, so input matching both goes to the AI.
fn freeform(input: &str) -> TransitionResult {
    if prompts::matches_any(input, &AI_KEYWORDS) {
        return ask_ai(input);
    }
    if prompts::matches_any(input, &START_KEYWORDS) {
        return TransitionResult::enter(ConversationState::CollectingName);
    }
    ask_ai(input)
}

fn ask_ai(input: &str) -> TransitionResult {
    TransitionResult::new(ConversationState::Freeform).with_effect(Effect::AskAi {
        text: input.to_string(),
    })
}

fn collect(
    state: ConversationState,
    field: LeadField,
    input: &str,
    valid: bool,
    error: ValidationError,
) -> TransitionResult {
    if !valid {
        return reject(state, error);
    }
    let Some(next) = state.next() else {
        return reject(state, error);
    };
    TransitionResult::enter(next).with_effect_first(Effect::store(field, input))
}

fn reject(state: ConversationState, error: ValidationError) -> TransitionResult {
    TransitionResult::new(state).with_effect(Effect::Reject(error))
}

/// Final step: store the message, submit, and drop back to free text without
/// waiting on the submission.
fn submit(draft: &LeadDraft, message: &str) -> TransitionResult {
    let mut completed = draft.clone();
    completed.set(LeadField::Message, message);

    let result = TransitionResult::new(ConversationState::Freeform)
        .with_effect(Effect::store(LeadField::Message, message));

    match completed.to_record() {
        Some(record) => result
            .with_effect(Effect::reply(prompts::SENDING))
            .with_effect(Effect::SubmitLead {
                record,
                source: EnquiryType::Chatbot,
            })
            .with_effect(Effect::ResetLead),
        None => result
            .with_effect(Effect::reply(prompts::SUBMIT_FAILED))
            .with_effect(Effect::ResetLead),
    }
}
