//! The router: selects the single applicable rule and derives its outcome

use crate::flow::AnswerValue;
use crate::routing::rule::{NextNodeType, RoutingRule};
use serde::{Deserialize, Serialize};

/// The router's decision for one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Outcome {
    /// Advance to another question
    Question {
        #[serde(rename = "questionId")]
        question_id: String,
    },
    /// Resolve to a goal-backed result; an empty id list yields a result
    /// with zero recommendations
    Goal {
        #[serde(rename = "goalIds")]
        goal_ids: Vec<String>,
    },
    /// Terminate the flow
    End,
}

/// Decide the next node for the answer given to `current_question_id`.
///
/// Candidates are the rules whose `from_question_id` matches, evaluated
/// ascending by priority (stable for ties). The first matching rule wins
/// and all later candidates are ignored, even if they would also match.
///
/// Returns `None` when no candidate matches - a defined outcome, not an
/// error: the flow cannot proceed and no terminal is configured. A
/// matched `Question` rule missing its `next_question_id` fails outcome
/// derivation and is reported the same way.
///
/// Pure and deterministic: identical inputs always yield identical
/// outcomes, so caller-side retries are safe.
pub fn decide_next_node(
    current_question_id: &str,
    answer: &AnswerValue,
    rules: &[RoutingRule],
) -> Option<Outcome> {
    let mut candidates: Vec<&RoutingRule> = rules
        .iter()
        .filter(|r| r.from_question_id == current_question_id)
        .collect();
    // Stable sort: equal priorities keep their input order
    candidates.sort_by_key(|r| r.priority);

    let matched = candidates.into_iter().find(|r| r.matches(answer))?;

    match matched.next_node_type {
        NextNodeType::Question => {
            let question_id = matched.next_question_id.clone()?;
            Some(Outcome::Question { question_id })
        }
        NextNodeType::Goal => Some(Outcome::Goal {
            goal_ids: matched.next_goal_ids.clone().unwrap_or_default(),
        }),
        NextNodeType::End => Some(Outcome::End),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::rule::MatchType;

    fn dev_to_db_rules() -> Vec<RoutingRule> {
        vec![
            RoutingRule::to_question("r1", "q_env", "q_db")
                .matching(MatchType::AnyOf, ["dev"])
                .with_priority(1),
            RoutingRule::to_question("r2", "q_env", "q_scale")
                .matching(MatchType::AnyOf, ["prod"])
                .with_priority(1),
        ]
    }

    #[test]
    fn test_routes_to_question_on_match() {
        let outcome = decide_next_node("q_env", &"dev".into(), &dev_to_db_rules());
        assert_eq!(
            outcome,
            Some(Outcome::Question {
                question_id: "q_db".into()
            })
        );
    }

    #[test]
    fn test_returns_none_when_nothing_matches() {
        assert_eq!(
            decide_next_node("q_env", &"staging".into(), &dev_to_db_rules()),
            None
        );
    }

    #[test]
    fn test_rules_for_other_questions_are_ignored() {
        let rules = vec![RoutingRule::to_end("r1", "q_other")];
        assert_eq!(decide_next_node("q_env", &"dev".into(), &rules), None);
    }

    #[test]
    fn test_lowest_priority_wins_when_both_match() {
        let rules = vec![
            RoutingRule::to_question("r2", "q_env", "q_second")
                .matching(MatchType::AnyOf, ["dev"])
                .with_priority(2),
            RoutingRule::to_question("r1", "q_env", "q_first")
                .matching(MatchType::AnyOf, ["dev"])
                .with_priority(1),
        ];

        assert_eq!(
            decide_next_node("q_env", &"dev".into(), &rules),
            Some(Outcome::Question {
                question_id: "q_first".into()
            })
        );
    }

    #[test]
    fn test_equal_priority_ties_keep_input_order() {
        let rules = vec![
            RoutingRule::to_question("r_a", "q1", "q_a")
                .matching(MatchType::Always, Vec::<String>::new())
                .with_priority(5),
            RoutingRule::to_question("r_b", "q1", "q_b")
                .matching(MatchType::Always, Vec::<String>::new())
                .with_priority(5),
        ];

        assert_eq!(
            decide_next_node("q1", &"x".into(), &rules),
            Some(Outcome::Question {
                question_id: "q_a".into()
            })
        );
    }

    #[test]
    fn test_later_candidates_ignored_after_first_match() {
        // The priority-1 End rule fires; the priority-2 Goal rule that
        // would also match is never consulted.
        let rules = vec![
            RoutingRule::to_goals("r2", "q1", ["UC001"]).with_priority(2),
            RoutingRule::to_end("r1", "q1").with_priority(1),
        ];

        assert_eq!(decide_next_node("q1", &"x".into(), &rules), Some(Outcome::End));
    }

    #[test]
    fn test_goal_outcome_carries_ids() {
        let rules = vec![
            RoutingRule::to_goals("r1", "q_db", ["UC001", "UC002"])
                .matching(MatchType::AnyOf, ["none"]),
        ];

        assert_eq!(
            decide_next_node("q_db", &"none".into(), &rules),
            Some(Outcome::Goal {
                goal_ids: vec!["UC001".into(), "UC002".into()]
            })
        );
    }

    #[test]
    fn test_goal_rule_without_ids_yields_empty_list() {
        let mut rule = RoutingRule::to_goals("r1", "q1", Vec::<String>::new());
        rule.next_goal_ids = None;

        assert_eq!(
            decide_next_node("q1", &"x".into(), &[rule]),
            Some(Outcome::Goal { goal_ids: vec![] })
        );
    }

    #[test]
    fn test_question_rule_without_target_fails_derivation() {
        let mut rule = RoutingRule::to_question("r1", "q1", "unused");
        rule.next_question_id = None;

        assert_eq!(decide_next_node("q1", &"x".into(), &[rule]), None);
    }

    #[test]
    fn test_decide_is_idempotent() {
        let rules = dev_to_db_rules();
        let answer: AnswerValue = "dev".into();

        let first = decide_next_node("q_env", &answer, &rules);
        let second = decide_next_node("q_env", &answer, &rules);
        assert_eq!(first, second);
    }

    #[test]
    fn test_outcome_serde_shape() {
        let outcome = Outcome::Goal {
            goal_ids: vec!["UC001".into()],
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["type"], "goal");
        assert_eq!(value["goalIds"][0], "UC001");

        let end = serde_json::to_value(Outcome::End).unwrap();
        assert_eq!(end["type"], "end");
    }
}
