//! Conversation state: tracks which input the widget is collecting.

use serde::{Deserialize, Serialize};

use super::model::LeadField;

/// The states of the chatbot conversation.
///
/// Greeting → Freeform, then the lead form runs linearly
/// CollectingName → … → CollectingMessage and drops back to Freeform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    Greeting,
    Freeform,
    CollectingName,
    CollectingEmail,
    CollectingPhone,
    CollectingProject,
    CollectingMessage,
}

impl ConversationState {
    /// Check if a transition from `self` to `target` is valid.
    ///
    /// Staying put is always legal (validation failures, AI replies).
    pub fn can_transition_to(&self, target: ConversationState) -> bool {
        use ConversationState::*;
        *self == target
            || matches!(
                (self, target),
                (Greeting, Freeform)
                    | (Freeform, CollectingName)
                    | (CollectingName, CollectingEmail)
                    | (CollectingEmail, CollectingPhone)
                    | (CollectingPhone, CollectingProject)
                    | (CollectingProject, CollectingMessage)
                    | (CollectingMessage, Freeform)
            )
    }

    /// The state reached when the current step succeeds.
    ///
    /// Freeform has no single successor; it only leaves on the start keywords.
    pub fn next(&self) -> Option<ConversationState> {
        use ConversationState::*;
        match self {
            Greeting => Some(Freeform),
            Freeform => None,
            CollectingName => Some(CollectingEmail),
            CollectingEmail => Some(CollectingPhone),
            CollectingPhone => Some(CollectingProject),
            CollectingProject => Some(CollectingMessage),
            CollectingMessage => Some(Freeform),
        }
    }

    /// The lead field collected in this state, if it is a form step.
    pub fn field(&self) -> Option<LeadField> {
        match self {
            Self::CollectingName => Some(LeadField::Name),
            Self::CollectingEmail => Some(LeadField::Email),
            Self::CollectingPhone => Some(LeadField::Phone),
            Self::CollectingProject => Some(LeadField::ProjectType),
            Self::CollectingMessage => Some(LeadField::Message),
            Self::Greeting | Self::Freeform => None,
        }
    }

    /// Whether the widget is in the middle of the lead form.
    pub fn is_collecting(&self) -> bool {
        self.field().is_some()
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::Greeting
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Greeting => "greeting",
            Self::Freeform => "freeform",
            Self::CollectingName => "collecting_name",
            Self::CollectingEmail => "collecting_email",
            Self::CollectingPhone => "collecting_phone",
            Self::CollectingProject => "collecting_project",
            Self::CollectingMessage => "collecting_message",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ConversationState; 7] = [
        ConversationState::Greeting,
        ConversationState::Freeform,
        ConversationState::CollectingName,
        ConversationState::CollectingEmail,
        ConversationState::CollectingPhone,
        ConversationState::CollectingProject,
        ConversationState::CollectingMessage,
    ];

    #[test]
    fn valid_transitions() {
        use ConversationState::*;
        let transitions = [
            (Greeting, Freeform),
            (Freeform, CollectingName),
            (CollectingName, CollectingEmail),
            (CollectingEmail, CollectingPhone),
            (CollectingPhone, CollectingProject),
            (CollectingProject, CollectingMessage),
            (CollectingMessage, Freeform),
        ];
        for (from, to) in transitions {
            assert!(
                from.can_transition_to(to),
                "{from} should transition to {to}"
            );
        }
    }

    #[test]
    fn invalid_transitions() {
        use ConversationState::*;
        // Skip steps
        assert!(!Freeform.can_transition_to(CollectingEmail));
        assert!(!CollectingName.can_transition_to(CollectingPhone));
        // Go backward
        assert!(!CollectingEmail.can_transition_to(CollectingName));
        // Never return to greeting
        assert!(!Freeform.can_transition_to(Greeting));
        // Abandon the form mid-way
        assert!(!CollectingPhone.can_transition_to(Freeform));
    }

    #[test]
    fn self_transitions_are_allowed() {
        for state in ALL {
            assert!(state.can_transition_to(state), "{state} should stay put");
        }
    }

    #[test]
    fn next_walks_the_form() {
        use ConversationState::*;
        let mut current = CollectingName;
        let expected = [
            CollectingEmail,
            CollectingPhone,
            CollectingProject,
            CollectingMessage,
            Freeform,
        ];
        for expected_next in expected {
            let next = current.next().unwrap();
            assert_eq!(next, expected_next);
            assert!(current.can_transition_to(next));
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn form_states_map_to_fields() {
        assert!(!ConversationState::Greeting.is_collecting());
        assert!(!ConversationState::Freeform.is_collecting());
        assert_eq!(
            ConversationState::CollectingProject.field(),
            Some(LeadField::ProjectType)
        );
        assert_eq!(ALL.iter().filter(|s| s.is_collecting()).count(), 5);
    }

    #[test]
    fn display_matches_serde() {
        for state in ALL {
            let display = format!("{state}");
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(
                format!("\"{display}\""),
                json,
                "Display and serde should match for {state:?}"
            );
        }
    }

    #[test]
    fn default_is_greeting() {
        assert_eq!(ConversationState::default(), ConversationState::Greeting);
    }
}
