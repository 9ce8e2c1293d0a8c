//! Question entity and its answer shape

use serde::{Deserialize, Serialize};

/// Shape of the answer a question expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Exactly one option is selected
    #[default]
    SingleChoice,
    /// Zero or more options are selected
    MultiChoice,
    /// Free-form text input
    Text,
}

impl QuestionKind {
    pub fn as_str(&self) -> &str {
        match self {
            QuestionKind::SingleChoice => "single_choice",
            QuestionKind::MultiChoice => "multi_choice",
            QuestionKind::Text => "text",
        }
    }

    /// Whether this kind carries a fixed option set
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionKind::SingleChoice | QuestionKind::MultiChoice)
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_choice" => Ok(QuestionKind::SingleChoice),
            "multi_choice" => Ok(QuestionKind::MultiChoice),
            "text" => Ok(QuestionKind::Text),
            _ => Err(format!(
                "Unknown question type: {}. Valid: single_choice, multi_choice, text",
                s
            )),
        }
    }
}

/// One selectable option of a choice question
///
/// `value` is the token compared against routing rules; `label` is what
/// the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
}

impl QuestionOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A question in the flow (catalog-owned, read-only snapshot)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Opaque identity assigned by the catalog
    pub id: String,
    /// Display text
    pub text: String,
    /// Answer shape
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Ordered option set; empty for `text` questions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(QuestionOption::new(value, label));
        self
    }

    /// Look up an option by its position (as presented to the user)
    pub fn option_at(&self, index: usize) -> Option<&QuestionOption> {
        self.options.get(index)
    }
}
