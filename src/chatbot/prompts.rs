//! Bot copy and keyword sets for the chatbot conversation.

use super::state::ConversationState;

/// First transcript entry of every conversation.
pub const GREETING: &str = "Hello 👋";

pub const HOW_CAN_I_HELP: &str = "How can I help you today?";

pub const SENDING: &str = "Sending your info to our team...";

pub const SUBMIT_OK: &str = "✅ Thanks! Our team will get back to you shortly.";

pub const SUBMIT_FAILED: &str =
    "❌ Sorry, we couldn't send your details right now. Please try again later.";

/// Substituted when the AI collaborator fails.
pub const AI_FALLBACK: &str = "Sorry, something went wrong. Please try again later.";

/// Freeform inputs containing any of these go to the AI. Checked first.
pub const AI_KEYWORDS: [&str; 6] = ["service", "offer", "question", "help", "what", "do you"];

/// Freeform inputs containing any of these start the lead form.
pub const START_KEYWORDS: [&str; 2] = ["start", "project"];

/// The prompt shown on entering a state, if it has one.
pub fn prompt_for(state: ConversationState) -> Option<&'static str> {
    match state {
        ConversationState::Greeting => None,
        ConversationState::Freeform => Some(HOW_CAN_I_HELP),
        ConversationState::CollectingName => Some("Can I have your Name?"),
        ConversationState::CollectingEmail => Some("Thanks! Now please share your Email ID:"),
        ConversationState::CollectingPhone => Some("Got it! Please provide your phone Number:"),
        ConversationState::CollectingProject => {
            Some("Great! What type of project are you interested in?")
        }
        ConversationState::CollectingMessage => {
            Some("Perfect 👍 Lastly, please type your Message or Query:")
        }
    }
}

/// Case-insensitive substring match against a keyword set.
pub fn matches_any(input: &str, keywords: &[&str]) -> bool {
    let lowered = input.to_lowercase();
    keywords.iter().any(|k| lowered.contains(k))
}
