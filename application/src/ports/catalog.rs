//! Catalog port
//!
//! Defines the interface to the external read-only content store holding
//! questions, goals, services, and routing rules. Implementations
//! (adapters) live in the infrastructure layer; the engine never knows
//! how records are fetched or cached.

use async_trait::async_trait;
use compass_domain::{Goal, Question, RoutingRule, Service};
use thiserror::Error;

/// Errors that can occur while fetching catalog records
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog unreachable: {0}")]
    ConnectionFailed(String),

    #[error("Catalog returned malformed data: {0}")]
    InvalidResponse(String),

    #[error("Catalog fetch timed out")]
    Timeout,

    #[error("Catalog error: {0}")]
    Other(String),
}

impl CatalogError {
    /// Whether retrying the same fetch can reasonably succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CatalogError::ConnectionFailed(_) | CatalogError::Timeout
        )
    }
}

/// Read access to the catalog store
///
/// All lookups return snapshots; records are immutable once fetched.
/// A missing record is `None` / absent from the result, not an error -
/// classifying the gap (caller mistake vs. configuration mistake) is the
/// use case's job.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// The flow's entry question, per the catalog-level ordering contract
    /// (lowest explicit order value first)
    async fn first_question(&self) -> Result<Option<Question>, CatalogError>;

    /// Look up a question by id
    async fn question(&self, id: &str) -> Result<Option<Question>, CatalogError>;

    /// All goals, in catalog order
    async fn goals(&self) -> Result<Vec<Goal>, CatalogError>;

    /// Goals for the given ids; ids without a record are simply absent
    async fn goals_by_ids(&self, ids: &[String]) -> Result<Vec<Goal>, CatalogError>;

    /// Services recommended for a goal (goal-scoped catalog query)
    async fn services_for_goal(&self, goal_id: &str) -> Result<Vec<Service>, CatalogError>;

    /// Routing rules applying after the given question, in catalog input
    /// order (the router owns priority sorting)
    async fn rules_from(&self, from_question_id: &str) -> Result<Vec<RoutingRule>, CatalogError>;
}
