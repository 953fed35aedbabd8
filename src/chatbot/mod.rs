//! Lead-capture chatbot.
//!
//! A visitor chats in free text until they ask to start a project; the bot
//! then walks them through name, email, phone, project type and message,
//! validating each step, and submits the lead as a `chatbot` enquiry. The
//! flow is a pure reducer (`transition`) driven by a `Conversation` host that
//! executes its effects against the AI and submission collaborators.

pub mod collaborators;
pub mod conversation;
pub mod model;
pub mod prompts;
pub mod routes;
pub mod sessions;
pub mod state;
pub mod transition;
pub mod validate;

pub use collaborators::{
    AiResponder, HttpAiClient, HttpEnquiryClient, LeadSubmitter, MailLeadSubmitter, Unconfigured,
};
pub use conversation::{Conversation, Turn};
pub use model::{LeadDraft, LeadField, LeadRecord, Message, Sender, Transcript};
pub use routes::{ChatRouteState, chat_routes};
pub use sessions::{Session, SessionStore, SessionView};
pub use state::ConversationState;
pub use transition::{Effect, TransitionError, TransitionResult, transition};
pub use validate::ProjectType;
