//! List Goals use case
//!
//! A flow is entered from a selected goal; this lists what can be
//! selected.

use crate::ports::catalog::{Catalog, CatalogError};
use compass_domain::Goal;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ListGoalsError {
    #[error("Catalog fetch failed: {0}")]
    Catalog(#[from] CatalogError),
}

/// Use case for listing the selectable goals
pub struct ListGoalsUseCase<C: Catalog + 'static> {
    catalog: Arc<C>,
}

impl<C: Catalog + 'static> ListGoalsUseCase<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    pub async fn execute(&self) -> Result<Vec<Goal>, ListGoalsError> {
        let goals = self.catalog.goals().await?;
        debug!("Catalog lists {} goals", goals.len());
        Ok(goals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use compass_domain::{Question, RoutingRule, Service};

    struct GoalsOnlyCatalog(Vec<Goal>);

    #[async_trait]
    impl Catalog for GoalsOnlyCatalog {
        async fn first_question(&self) -> Result<Option<Question>, CatalogError> {
            Ok(None)
        }

        async fn question(&self, _id: &str) -> Result<Option<Question>, CatalogError> {
            Ok(None)
        }

        async fn goals(&self) -> Result<Vec<Goal>, CatalogError> {
            Ok(self.0.clone())
        }

        async fn goals_by_ids(&self, _ids: &[String]) -> Result<Vec<Goal>, CatalogError> {
            Ok(vec![])
        }

        async fn services_for_goal(&self, _goal_id: &str) -> Result<Vec<Service>, CatalogError> {
            Ok(vec![])
        }

        async fn rules_from(&self, _from: &str) -> Result<Vec<RoutingRule>, CatalogError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_lists_goals_in_catalog_order() {
        let catalog = GoalsOnlyCatalog(vec![
            Goal::new("UC001", "Build a CSV converter"),
            Goal::new("UC002", "Replatform to containers"),
        ]);

        let goals = ListGoalsUseCase::new(Arc::new(catalog)).execute().await.unwrap();
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].id, "UC001");
    }
}
