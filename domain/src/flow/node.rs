//! Flow nodes - what the engine hands back to its caller

use crate::catalog::{Goal, Question, Service};
use serde::{Deserialize, Serialize};

/// The engine's output for one turn
///
/// Either the next question to ask, or a terminal result carrying the
/// resolved recommendations. "No further node" is expressed by the
/// caller-facing layer as the absence of a node, not as a variant here.
///
/// The serialized shape (`type` tag, `question` / `summary` / `services`
/// fields) is wire-compatible with existing clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlowNode {
    Question {
        question: Question,
    },
    Result {
        summary: String,
        services: Vec<Service>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        goals: Vec<Goal>,
    },
}

impl FlowNode {
    pub fn question(question: Question) -> Self {
        FlowNode::Question { question }
    }

    pub fn result(summary: impl Into<String>, services: Vec<Service>, goals: Vec<Goal>) -> Self {
        FlowNode::Result {
            summary: summary.into(),
            services,
            goals,
        }
    }

    /// Whether this node ends the flow
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowNode::Result { .. })
    }
}
