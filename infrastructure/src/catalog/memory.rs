//! In-memory catalog
//!
//! Serves records from plain vectors. Backs the file catalog, demos, and
//! tests; also useful as a seed catalog while authoring content.

use async_trait::async_trait;
use compass_application::ports::catalog::{Catalog, CatalogError};
use compass_domain::{Goal, Question, RoutingRule, Service};

/// Catalog adapter over in-memory record collections
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    questions: Vec<(i64, Question)>,
    goals: Vec<Goal>,
    services: Vec<(String, Service)>,
    rules: Vec<RoutingRule>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a question with its catalog-level order value
    pub fn with_question(mut self, order: i64, question: Question) -> Self {
        self.questions.push((order, question));
        self
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goals.push(goal);
        self
    }

    /// Register a service under the goal it is recommended for
    pub fn with_service(mut self, goal_id: impl Into<String>, service: Service) -> Self {
        self.services.push((goal_id.into(), service));
        self
    }

    pub fn with_rule(mut self, rule: RoutingRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
            && self.goals.is_empty()
            && self.services.is_empty()
            && self.rules.is_empty()
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn first_question(&self) -> Result<Option<Question>, CatalogError> {
        // Lowest order wins; insertion order breaks ties
        let mut best: Option<&(i64, Question)> = None;
        for entry in &self.questions {
            if best.is_none_or(|b| entry.0 < b.0) {
                best = Some(entry);
            }
        }
        Ok(best.map(|(_, q)| q.clone()))
    }

    async fn question(&self, id: &str) -> Result<Option<Question>, CatalogError> {
        Ok(self.questions.iter().map(|(_, q)| q).find(|q| q.id == id).cloned())
    }

    async fn goals(&self) -> Result<Vec<Goal>, CatalogError> {
        Ok(self.goals.clone())
    }

    async fn goals_by_ids(&self, ids: &[String]) -> Result<Vec<Goal>, CatalogError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.goals.iter().find(|g| &g.id == id).cloned())
            .collect())
    }

    async fn services_for_goal(&self, goal_id: &str) -> Result<Vec<Service>, CatalogError> {
        Ok(self
            .services
            .iter()
            .filter(|(gid, _)| gid == goal_id)
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn rules_from(&self, from_question_id: &str) -> Result<Vec<RoutingRule>, CatalogError> {
        Ok(self
            .rules
            .iter()
            .filter(|r| r.from_question_id == from_question_id)
            .cloned()
            .collect())
    }
}
