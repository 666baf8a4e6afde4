//! Conversational phase of a simulated audit.
//!
//! The phase is derived from the message history on every turn and never
//! stored. It only selects which guidance text is layered into directives;
//! a misclassification never affects persisted data.

use serde::{Deserialize, Serialize};

use crate::domain::knowledge::contains_closing_trigger;
use crate::domain::session::Message;

/// Below this many messages the session is still in the opening meeting.
pub const OPENING_MESSAGE_THRESHOLD: usize = 5;

/// Number of most recent messages scanned for closing-meeting phrases.
pub const RECENT_WINDOW: usize = 10;

/// Stage of the simulated audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Opening meeting: introductions, scope and plan.
    Opening,
    /// Interviews, document review and observation.
    Execution,
    /// Closing meeting: the auditor presents findings.
    Closing,
}

impl Phase {
    /// Swedish label used in hint directives.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Opening => "Startmöte",
            Self::Execution => "Revisionsutförande",
            Self::Closing => "Slutmöte",
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Opening
    }
}

/// Detects the phase from the ordered message history.
pub fn detect_phase(messages: &[Message]) -> Phase {
    if messages.len() < OPENING_MESSAGE_THRESHOLD {
        return Phase::Opening;
    }

    let start = messages.len().saturating_sub(RECENT_WINDOW);
    let recent = messages[start..]
        .iter()
        .map(|m| m.content.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    if contains_closing_trigger(&recent) {
        Phase::Closing
    } else {
        Phase::Execution
    }
}
