//! Flow state machine vocabulary
//!
//! The engine is stateless between calls: the state is derived fresh from
//! the answer history on every turn, never stored.

use serde::{Deserialize, Serialize};

/// Position of a flow session, derived from the answer history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FlowState {
    /// No answers yet
    Start,
    /// Awaiting an answer to the given question
    InQuestion {
        #[serde(rename = "questionId")]
        question_id: String,
    },
    /// Terminal: recommendations resolved
    Result,
    /// Terminal: no further node (no rule matched, or an End rule fired)
    Exhausted,
}

impl FlowState {
    /// Terminal states have no outgoing transitions; restarting requires
    /// discarding the history and re-entering at `Start`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::Result | FlowState::Exhausted)
    }
}

impl std::fmt::Display for FlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowState::Start => write!(f, "start"),
            FlowState::InQuestion { question_id } => write!(f, "in_question({})", question_id),
            FlowState::Result => write!(f, "result"),
            FlowState::Exhausted => write!(f, "exhausted"),
        }
    }
}
