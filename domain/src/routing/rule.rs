//! Routing rules and the rule matcher
//!
//! A [`RoutingRule`] maps (question, answer pattern) to a next-node
//! outcome. [`RoutingRule::matches`] is the matcher: a pure predicate
//! deciding whether a single rule applies to a given answer.

use crate::flow::AnswerValue;
use serde::{Deserialize, Serialize};

/// How a rule's configured choice tokens are compared against an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    /// At least one configured token is present in the answer
    AnyOf,
    /// Every configured token is present (the answer may carry extras)
    AllOf,
    /// No configured token is present
    NoneOf,
    /// Matches unconditionally, choice tokens are ignored
    Always,
    /// Anything the catalog sends that we don't recognize. Never matches.
    #[serde(other)]
    Unknown,
}

/// Kind of node a rule routes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextNodeType {
    Question,
    Goal,
    End,
}

/// A configured routing rule
///
/// Rules are read-only per evaluation; the catalog is their source of
/// truth. `priority` orders candidates ascending (lower fires first);
/// ties keep catalog input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRule {
    /// Opaque identity; not consulted during evaluation
    pub id: String,
    /// The question this rule applies after
    pub from_question_id: String,
    pub match_type: MatchType,
    /// Value tokens compared against the answer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub match_choices: Vec<String>,
    pub next_node_type: NextNodeType,
    /// Required when `next_node_type` is `Question`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_question_id: Option<String>,
    /// Consulted when `next_node_type` is `Goal`; may be empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_goal_ids: Option<Vec<String>>,
    pub priority: i64,
}

impl RoutingRule {
    /// Rule advancing to another question. Matches always until narrowed
    /// with [`matching`](Self::matching).
    pub fn to_question(
        id: impl Into<String>,
        from_question_id: impl Into<String>,
        next_question_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_question_id: from_question_id.into(),
            match_type: MatchType::Always,
            match_choices: Vec::new(),
            next_node_type: NextNodeType::Question,
            next_question_id: Some(next_question_id.into()),
            next_goal_ids: None,
            priority: 0,
        }
    }

    /// Rule resolving to a goal-backed result
    pub fn to_goals(
        id: impl Into<String>,
        from_question_id: impl Into<String>,
        goal_ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            from_question_id: from_question_id.into(),
            match_type: MatchType::Always,
            match_choices: Vec::new(),
            next_node_type: NextNodeType::Goal,
            next_question_id: None,
            next_goal_ids: Some(goal_ids.into_iter().map(Into::into).collect()),
            priority: 0,
        }
    }

    /// Rule terminating the flow
    pub fn to_end(id: impl Into<String>, from_question_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from_question_id: from_question_id.into(),
            match_type: MatchType::Always,
            match_choices: Vec::new(),
            next_node_type: NextNodeType::End,
            next_question_id: None,
            next_goal_ids: None,
            priority: 0,
        }
    }

    pub fn matching(
        mut self,
        match_type: MatchType,
        choices: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.match_type = match_type;
        self.match_choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Does this rule apply to the given answer?
    ///
    /// Pure predicate over the rule and the answer's normalized token
    /// set. Token comparison is exact string equality. `Always` ignores
    /// the configured tokens entirely; an empty token set trivially
    /// satisfies `AllOf` and `NoneOf`; unrecognized match types never
    /// match.
    pub fn matches(&self, answer: &AnswerValue) -> bool {
        match self.match_type {
            MatchType::Always => true,
            MatchType::AnyOf => self.match_choices.iter().any(|c| answer.contains(c)),
            MatchType::AllOf => self.match_choices.iter().all(|c| answer.contains(c)),
            MatchType::NoneOf => !self.match_choices.iter().any(|c| answer.contains(c)),
            MatchType::Unknown => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(match_type: MatchType, choices: &[&str]) -> RoutingRule {
        RoutingRule::to_end("r1", "q1").matching(match_type, choices.iter().copied())
    }

    #[test]
    fn test_always_matches_regardless_of_choices_and_answer() {
        assert!(rule(MatchType::Always, &[]).matches(&"anything".into()));
        assert!(rule(MatchType::Always, &["x", "y"]).matches(&"z".into()));
        assert!(rule(MatchType::Always, &["x"]).matches(&AnswerValue::Multi(vec![])));
    }

    #[test]
    fn test_any_of_matches_on_intersection() {
        let r = rule(MatchType::AnyOf, &["rds", "ddb"]);
        assert!(r.matches(&"rds".into()));
        assert!(r.matches(&vec!["none", "ddb"].into()));
        assert!(!r.matches(&"none".into()));
    }

    #[test]
    fn test_any_of_with_empty_choices_never_matches() {
        assert!(!rule(MatchType::AnyOf, &[]).matches(&"rds".into()));
    }

    #[test]
    fn test_all_of_requires_every_choice() {
        let r = rule(MatchType::AllOf, &["a", "b"]);
        assert!(r.matches(&vec!["a", "b", "c"].into()));
        assert!(!r.matches(&vec!["a"].into()));
        // Order of the answer tokens is irrelevant
        assert!(r.matches(&vec!["b", "a"].into()));
    }

    #[test]
    fn test_all_of_with_empty_choices_trivially_matches() {
        assert!(rule(MatchType::AllOf, &[]).matches(&"whatever".into()));
    }

    #[test]
    fn test_none_of_rejects_any_overlap() {
        let r = rule(MatchType::NoneOf, &["x"]);
        assert!(r.matches(&"y".into()));
        assert!(!r.matches(&"x".into()));
        assert!(!r.matches(&vec!["y", "x"].into()));
    }

    #[test]
    fn test_none_of_with_empty_choices_trivially_matches() {
        assert!(rule(MatchType::NoneOf, &[]).matches(&"x".into()));
    }

    #[test]
    fn test_unknown_match_type_fails_closed() {
        assert!(!rule(MatchType::Unknown, &["x"]).matches(&"x".into()));
        assert!(!rule(MatchType::Unknown, &[]).matches(&"x".into()));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!rule(MatchType::AnyOf, &["RDS"]).matches(&"rds".into()));
    }

    #[test]
    fn test_unrecognized_match_type_deserializes_to_unknown() {
        let r: RoutingRule = serde_json::from_str(
            r#"{
                "id": "r9",
                "fromQuestionId": "q1",
                "matchType": "Fuzzy",
                "matchChoices": ["a"],
                "nextNodeType": "End",
                "priority": 1
            }"#,
        )
        .unwrap();

        assert_eq!(r.match_type, MatchType::Unknown);
        assert!(!r.matches(&"a".into()));
    }

    #[test]
    fn test_serde_uses_camel_case_wire_names() {
        let r = RoutingRule::to_question("r1", "q_env", "q_db")
            .matching(MatchType::AnyOf, ["dev"])
            .with_priority(1);
        let value = serde_json::to_value(&r).unwrap();

        assert_eq!(value["fromQuestionId"], "q_env");
        assert_eq!(value["matchType"], "AnyOf");
        assert_eq!(value["nextNodeType"], "Question");
        assert_eq!(value["nextQuestionId"], "q_db");
    }
}
