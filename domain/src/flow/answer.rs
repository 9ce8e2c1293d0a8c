//! Answer value objects
//!
//! An [`Answer`] pairs a question id with the value the user gave. The
//! history of answers is caller-owned and append-only: each turn the full
//! history is re-submitted, so the engine stays stateless between calls.

use serde::{Deserialize, Serialize};

/// Value of a single answer
///
/// A scalar answer normalizes to a single-element token set; a
/// multi-select answer is its token set as given (order preserved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multi(Vec<String>),
}

impl AnswerValue {
    /// The normalized token set this value represents
    pub fn tokens(&self) -> &[String] {
        match self {
            AnswerValue::Single(value) => std::slice::from_ref(value),
            AnswerValue::Multi(values) => values,
        }
    }

    /// Exact-match membership test (no trimming, no case folding)
    pub fn contains(&self, token: &str) -> bool {
        self.tokens().iter().any(|t| t == token)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Single(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Single(value)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(values: Vec<String>) -> Self {
        AnswerValue::Multi(values)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(values: Vec<&str>) -> Self {
        AnswerValue::Multi(values.into_iter().map(String::from).collect())
    }
}

/// One entry of the answer history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// The question this answer was given to
    pub question_id: String,
    pub value: AnswerValue,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self {
            question_id: question_id.into(),
            value: value.into(),
        }
    }
}
