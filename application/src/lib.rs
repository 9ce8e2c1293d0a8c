//! Application layer for service-compass
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::FlowParams;
pub use ports::{
    catalog::{Catalog, CatalogError},
    flow_logger::{FlowEvent, FlowLogger, NoFlowLogger},
};
pub use use_cases::advance_flow::{
    AdvanceFlowError, AdvanceFlowInput, AdvanceFlowUseCase, FlowStep,
};
pub use use_cases::list_goals::{ListGoalsError, ListGoalsUseCase};
