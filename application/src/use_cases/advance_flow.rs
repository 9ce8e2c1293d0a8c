//! Advance Flow use case
//!
//! The flow orchestrator: takes the accumulated answer history, routes
//! the most recent answer, and resolves the outcome into a concrete next
//! node by pulling the referenced records from the catalog.
//!
//! The orchestrator holds no session state - every transition is computed
//! fresh from the supplied history, so any number of flow sessions can
//! advance concurrently through one instance.

use crate::config::FlowParams;
use crate::ports::catalog::{Catalog, CatalogError};
use crate::ports::flow_logger::{FlowEvent, FlowLogger, NoFlowLogger};
use compass_domain::{Answer, FlowNode, FlowState, Outcome, Service, decide_next_node};
use serde_json::json;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while advancing a flow
#[derive(Error, Debug)]
pub enum AdvanceFlowError {
    /// Caller error: the history's last entry references a question the
    /// catalog doesn't know. Rejected before the router runs.
    #[error("Answer history references unknown question: {question_id}")]
    UnknownQuestion { question_id: String },

    /// Configuration error: a rule routed to a question missing from the
    /// catalog. Surfaced distinctly, never coerced into "no match".
    #[error("Routing references missing question: {question_id}")]
    QuestionNotFound { question_id: String },

    /// Configuration error: a rule routed to a goal missing from the
    /// catalog.
    #[error("Routing references missing goal: {goal_id}")]
    GoalNotFound { goal_id: String },

    /// The catalog collaborator failed or timed out
    #[error("Catalog fetch failed: {0}")]
    Catalog(#[from] CatalogError),
}

impl AdvanceFlowError {
    /// Content-authoring mistakes, as opposed to caller or transport
    /// failures
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AdvanceFlowError::QuestionNotFound { .. } | AdvanceFlowError::GoalNotFound { .. }
        )
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, AdvanceFlowError::Catalog(e) if e.is_retryable())
    }
}

/// Input for the AdvanceFlow use case
///
/// The history is append-only and oldest-first; its last entry is the
/// current position.
#[derive(Debug, Clone, Default)]
pub struct AdvanceFlowInput {
    pub history: Vec<Answer>,
}

impl AdvanceFlowInput {
    pub fn new(history: Vec<Answer>) -> Self {
        Self { history }
    }

    /// A flow that hasn't started yet
    pub fn start() -> Self {
        Self::default()
    }
}

/// One computed transition
#[derive(Debug, Clone, PartialEq)]
pub struct FlowStep {
    /// The state the flow is in after this turn
    pub state: FlowState,
    /// The node to present next; `None` for an exhausted flow
    pub node: Option<FlowNode>,
}

impl FlowStep {
    fn exhausted() -> Self {
        Self {
            state: FlowState::Exhausted,
            node: None,
        }
    }
}

/// Use case for advancing a flow by one turn
pub struct AdvanceFlowUseCase<C: Catalog + 'static> {
    catalog: Arc<C>,
    params: FlowParams,
    logger: Arc<dyn FlowLogger>,
}

impl<C: Catalog + 'static> AdvanceFlowUseCase<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            params: FlowParams::default(),
            logger: Arc::new(NoFlowLogger),
        }
    }

    pub fn with_params(mut self, params: FlowParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn FlowLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Compute the next node for the supplied history.
    ///
    /// Deterministic for identical inputs and catalog contents, so
    /// caller-side retries are safe.
    pub async fn execute(&self, input: AdvanceFlowInput) -> Result<FlowStep, AdvanceFlowError> {
        match input.history.last() {
            None => self.enter_flow().await,
            Some(current) => self.advance(&input.history, current).await,
        }
    }

    /// Start transition: fetch the catalog's entry question
    async fn enter_flow(&self) -> Result<FlowStep, AdvanceFlowError> {
        let first = self.bounded(self.catalog.first_question()).await?;

        match first {
            Some(question) => {
                info!("Flow started at question {}", question.id);
                self.logger.log(FlowEvent::new(
                    "flow_started",
                    json!({ "questionId": question.id }),
                ));

                Ok(FlowStep {
                    state: FlowState::InQuestion {
                        question_id: question.id.clone(),
                    },
                    node: Some(FlowNode::question(question)),
                })
            }
            None => {
                warn!("Catalog has no questions; flow cannot start");
                Ok(FlowStep::exhausted())
            }
        }
    }

    /// One routed turn: validate the current position, decide, resolve
    async fn advance(
        &self,
        history: &[Answer],
        current: &Answer,
    ) -> Result<FlowStep, AdvanceFlowError> {
        debug!(
            "Advancing flow at {} ({} answers)",
            current.question_id,
            history.len()
        );

        // The current question record and the candidate rules are
        // independent fetches; issue them concurrently.
        let (question, rules) = tokio::try_join!(
            self.bounded(self.catalog.question(&current.question_id)),
            self.bounded(self.catalog.rules_from(&current.question_id)),
        )?;

        if question.is_none() {
            return Err(AdvanceFlowError::UnknownQuestion {
                question_id: current.question_id.clone(),
            });
        }

        let outcome = decide_next_node(&current.question_id, &current.value, &rules);
        self.logger.log(FlowEvent::new(
            "flow_turn",
            json!({
                "turn": history.len(),
                "questionId": current.question_id,
                "outcome": &outcome,
            }),
        ));

        match outcome {
            Some(Outcome::Question { question_id }) => self.resolve_question(question_id).await,
            Some(Outcome::Goal { goal_ids }) => self.resolve_result(&goal_ids).await,
            Some(Outcome::End) => {
                info!("Flow ended by rule after {}", current.question_id);
                Ok(FlowStep::exhausted())
            }
            None => {
                info!(
                    "No routing rule matched after {}; flow is exhausted",
                    current.question_id
                );
                Ok(FlowStep::exhausted())
            }
        }
    }

    /// Resolve a `Question` outcome into the referenced question record
    async fn resolve_question(&self, question_id: String) -> Result<FlowStep, AdvanceFlowError> {
        let Some(question) = self.bounded(self.catalog.question(&question_id)).await? else {
            warn!("Routing rule points at missing question {}", question_id);
            return Err(AdvanceFlowError::QuestionNotFound { question_id });
        };

        Ok(FlowStep {
            state: FlowState::InQuestion {
                question_id: question.id.clone(),
            },
            node: Some(FlowNode::question(question)),
        })
    }

    /// Resolve a `Goal` outcome into goal records plus their services.
    ///
    /// Goal records and the per-goal service lists are independent
    /// lookups; all are issued concurrently and the transition finalizes
    /// once every fetch completes.
    async fn resolve_result(&self, goal_ids: &[String]) -> Result<FlowStep, AdvanceFlowError> {
        let goals_fut = self.bounded(self.catalog.goals_by_ids(goal_ids));
        let services_fut = futures::future::try_join_all(
            goal_ids
                .iter()
                .map(|goal_id| self.bounded(self.catalog.services_for_goal(goal_id))),
        );
        let (goals, services_per_goal) = tokio::try_join!(goals_fut, services_fut)?;

        for goal_id in goal_ids {
            if !goals.iter().any(|g| &g.id == goal_id) {
                warn!("Routing rule points at missing goal {}", goal_id);
                return Err(AdvanceFlowError::GoalNotFound {
                    goal_id: goal_id.clone(),
                });
            }
        }

        // A service recommended by several goals appears once
        let mut seen = HashSet::new();
        let services: Vec<Service> = services_per_goal
            .into_iter()
            .flatten()
            .filter(|s| seen.insert(s.id.clone()))
            .collect();

        let summary = if goals.is_empty() {
            "No recommendations are configured for this path.".to_string()
        } else {
            format!(
                "Recommended services for: {}",
                goals
                    .iter()
                    .map(|g| g.title.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };

        info!(
            "Flow resolved to a result: {} goals, {} services",
            goals.len(),
            services.len()
        );

        Ok(FlowStep {
            state: FlowState::Result,
            node: Some(FlowNode::result(summary, services, goals)),
        })
    }

    /// Bound a single catalog fetch by the configured per-fetch timeout
    async fn bounded<T>(
        &self,
        fetch: impl Future<Output = Result<T, CatalogError>>,
    ) -> Result<T, CatalogError> {
        match self.params.fetch_timeout {
            Some(limit) => match tokio::time::timeout(limit, fetch).await {
                Ok(result) => result,
                Err(_) => Err(CatalogError::Timeout),
            },
            None => fetch.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use compass_domain::{Goal, MatchType, Question, QuestionKind, RoutingRule};
    use std::time::Duration;

    /// In-memory catalog stub; `delay` simulates a slow collaborator.
    #[derive(Default)]
    struct StubCatalog {
        questions: Vec<Question>,
        goals: Vec<Goal>,
        services: Vec<(String, Service)>,
        rules: Vec<RoutingRule>,
        delay: Option<Duration>,
    }

    impl StubCatalog {
        async fn simulate_latency(&self) {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
        }
    }

    #[async_trait]
    impl Catalog for StubCatalog {
        async fn first_question(&self) -> Result<Option<Question>, CatalogError> {
            self.simulate_latency().await;
            Ok(self.questions.first().cloned())
        }

        async fn question(&self, id: &str) -> Result<Option<Question>, CatalogError> {
            self.simulate_latency().await;
            Ok(self.questions.iter().find(|q| q.id == id).cloned())
        }

        async fn goals(&self) -> Result<Vec<Goal>, CatalogError> {
            self.simulate_latency().await;
            Ok(self.goals.clone())
        }

        async fn goals_by_ids(&self, ids: &[String]) -> Result<Vec<Goal>, CatalogError> {
            self.simulate_latency().await;
            Ok(ids
                .iter()
                .filter_map(|id| self.goals.iter().find(|g| &g.id == id).cloned())
                .collect())
        }

        async fn services_for_goal(&self, goal_id: &str) -> Result<Vec<Service>, CatalogError> {
            self.simulate_latency().await;
            Ok(self
                .services
                .iter()
                .filter(|(gid, _)| gid == goal_id)
                .map(|(_, s)| s.clone())
                .collect())
        }

        async fn rules_from(
            &self,
            from_question_id: &str,
        ) -> Result<Vec<RoutingRule>, CatalogError> {
            self.simulate_latency().await;
            Ok(self
                .rules
                .iter()
                .filter(|r| r.from_question_id == from_question_id)
                .cloned()
                .collect())
        }
    }

    /// Two questions routing to a goal with one service, per the usual
    /// dev-environment walkthrough.
    fn walkthrough_catalog() -> StubCatalog {
        StubCatalog {
            questions: vec![
                Question::new("q_env", "Where will this run?", QuestionKind::SingleChoice)
                    .with_option("dev", "Development")
                    .with_option("prod", "Production"),
                Question::new("q_db", "How will you use a database?", QuestionKind::SingleChoice)
                    .with_option("rds", "Managed relational")
                    .with_option("none", "No database"),
            ],
            goals: vec![Goal::new("UC001", "Build a CSV converter")],
            services: vec![(
                "UC001".to_string(),
                Service::new("svc_lambda", "Serverless Functions"),
            )],
            rules: vec![
                RoutingRule::to_question("r_env_dev", "q_env", "q_db")
                    .matching(MatchType::AnyOf, ["dev"])
                    .with_priority(1),
                RoutingRule::to_goals("r_db_none", "q_db", ["UC001"])
                    .matching(MatchType::AnyOf, ["none"])
                    .with_priority(1),
            ],
            delay: None,
        }
    }

    fn use_case(catalog: StubCatalog) -> AdvanceFlowUseCase<StubCatalog> {
        AdvanceFlowUseCase::new(Arc::new(catalog))
    }

    #[tokio::test]
    async fn test_empty_history_returns_first_question() {
        let step = use_case(walkthrough_catalog())
            .execute(AdvanceFlowInput::start())
            .await
            .unwrap();

        assert_eq!(
            step.state,
            FlowState::InQuestion {
                question_id: "q_env".into()
            }
        );
        match step.node {
            Some(FlowNode::Question { question }) => assert_eq!(question.id, "q_env"),
            other => panic!("Expected question node, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_catalog_exhausts_immediately() {
        let step = use_case(StubCatalog::default())
            .execute(AdvanceFlowInput::start())
            .await
            .unwrap();

        assert_eq!(step.state, FlowState::Exhausted);
        assert!(step.node.is_none());
    }

    #[tokio::test]
    async fn test_answer_routes_to_next_question() {
        let step = use_case(walkthrough_catalog())
            .execute(AdvanceFlowInput::new(vec![Answer::new("q_env", "dev")]))
            .await
            .unwrap();

        assert_eq!(
            step.state,
            FlowState::InQuestion {
                question_id: "q_db".into()
            }
        );
    }

    #[tokio::test]
    async fn test_full_walkthrough_resolves_goal_services() {
        let step = use_case(walkthrough_catalog())
            .execute(AdvanceFlowInput::new(vec![
                Answer::new("q_env", "dev"),
                Answer::new("q_db", "none"),
            ]))
            .await
            .unwrap();

        assert_eq!(step.state, FlowState::Result);
        match step.node {
            Some(FlowNode::Result {
                summary,
                services,
                goals,
            }) => {
                assert_eq!(services.len(), 1);
                assert_eq!(services[0].id, "svc_lambda");
                assert_eq!(goals[0].id, "UC001");
                assert!(summary.contains("Build a CSV converter"));
            }
            other => panic!("Expected result node, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unmatched_answer_exhausts_flow() {
        let step = use_case(walkthrough_catalog())
            .execute(AdvanceFlowInput::new(vec![Answer::new("q_env", "staging")]))
            .await
            .unwrap();

        assert_eq!(step.state, FlowState::Exhausted);
        assert!(step.node.is_none());
    }

    #[tokio::test]
    async fn test_end_rule_exhausts_flow() {
        let mut catalog = walkthrough_catalog();
        catalog.rules.push(
            RoutingRule::to_end("r_env_prod", "q_env")
                .matching(MatchType::AnyOf, ["prod"])
                .with_priority(2),
        );

        let step = use_case(catalog)
            .execute(AdvanceFlowInput::new(vec![Answer::new("q_env", "prod")]))
            .await
            .unwrap();

        assert_eq!(step.state, FlowState::Exhausted);
    }

    #[tokio::test]
    async fn test_unknown_current_question_is_caller_error() {
        let err = use_case(walkthrough_catalog())
            .execute(AdvanceFlowInput::new(vec![Answer::new("q_missing", "dev")]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AdvanceFlowError::UnknownQuestion { ref question_id } if question_id == "q_missing"
        ));
        assert!(!err.is_configuration());
    }

    #[tokio::test]
    async fn test_rule_to_missing_question_is_configuration_error() {
        let mut catalog = walkthrough_catalog();
        catalog.rules = vec![
            RoutingRule::to_question("r_bad", "q_env", "q_ghost")
                .matching(MatchType::AnyOf, ["dev"]),
        ];

        let err = use_case(catalog)
            .execute(AdvanceFlowInput::new(vec![Answer::new("q_env", "dev")]))
            .await
            .unwrap_err();

        assert!(matches!(err, AdvanceFlowError::QuestionNotFound { .. }));
        assert!(err.is_configuration());
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_rule_to_missing_goal_is_configuration_error() {
        let mut catalog = walkthrough_catalog();
        catalog.rules = vec![
            RoutingRule::to_goals("r_bad", "q_env", ["UC404"])
                .matching(MatchType::AnyOf, ["dev"]),
        ];

        let err = use_case(catalog)
            .execute(AdvanceFlowInput::new(vec![Answer::new("q_env", "dev")]))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AdvanceFlowError::GoalNotFound { ref goal_id } if goal_id == "UC404"
        ));
    }

    #[tokio::test]
    async fn test_goal_rule_with_no_ids_yields_empty_result() {
        let mut catalog = walkthrough_catalog();
        catalog.rules = vec![
            RoutingRule::to_goals("r_empty", "q_env", Vec::<String>::new())
                .matching(MatchType::AnyOf, ["dev"]),
        ];

        let step = use_case(catalog)
            .execute(AdvanceFlowInput::new(vec![Answer::new("q_env", "dev")]))
            .await
            .unwrap();

        assert_eq!(step.state, FlowState::Result);
        match step.node {
            Some(FlowNode::Result {
                services, goals, ..
            }) => {
                assert!(services.is_empty());
                assert!(goals.is_empty());
            }
            other => panic!("Expected result node, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_shared_service_appears_once() {
        let mut catalog = walkthrough_catalog();
        catalog.goals.push(Goal::new("UC002", "Replatform to containers"));
        catalog.services.push((
            "UC002".to_string(),
            Service::new("svc_lambda", "Serverless Functions"),
        ));
        catalog.rules = vec![
            RoutingRule::to_goals("r_both", "q_env", ["UC001", "UC002"])
                .matching(MatchType::AnyOf, ["dev"]),
        ];

        let step = use_case(catalog)
            .execute(AdvanceFlowInput::new(vec![Answer::new("q_env", "dev")]))
            .await
            .unwrap();

        match step.node {
            Some(FlowNode::Result {
                services, goals, ..
            }) => {
                assert_eq!(goals.len(), 2);
                assert_eq!(services.len(), 1);
            }
            other => panic!("Expected result node, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_catalog_times_out_as_retryable() {
        let mut catalog = walkthrough_catalog();
        catalog.delay = Some(Duration::from_millis(100));

        let use_case = AdvanceFlowUseCase::new(Arc::new(catalog)).with_params(
            FlowParams::default().with_fetch_timeout(Some(Duration::from_millis(5))),
        );

        let err = use_case
            .execute(AdvanceFlowInput::start())
            .await
            .unwrap_err();

        assert!(matches!(err, AdvanceFlowError::Catalog(CatalogError::Timeout)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_identical_input_yields_identical_step() {
        let use_case = use_case(walkthrough_catalog());
        let history = vec![Answer::new("q_env", "dev")];

        let first = use_case
            .execute(AdvanceFlowInput::new(history.clone()))
            .await
            .unwrap();
        let second = use_case
            .execute(AdvanceFlowInput::new(history))
            .await
            .unwrap();

        assert_eq!(first, second);
    }
}
