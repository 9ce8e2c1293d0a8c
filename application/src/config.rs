//! Flow parameters - orchestration control.
//!
//! [`FlowParams`] groups the static parameters that bound the catalog
//! resolution steps in
//! [`AdvanceFlowUseCase`](crate::use_cases::advance_flow::AdvanceFlowUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Orchestration control parameters.
///
/// Each catalog fetch within a turn is bounded independently by
/// `fetch_timeout`; `None` disables the bound (adapters may still apply
/// their own transport timeouts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowParams {
    /// Timeout applied to each individual catalog fetch.
    pub fetch_timeout: Option<Duration>,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            fetch_timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl FlowParams {
    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}
