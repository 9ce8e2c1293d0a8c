//! Catalog entities
//!
//! Read-only snapshots of the records owned by the external catalog
//! store: the questions asked during a flow, the goals a flow is entered
//! from, and the services recommended at its end. Fetching, caching, and
//! rendering of these records are collaborator concerns.

pub mod goal;
pub mod question;
pub mod service;

pub use goal::Goal;
pub use question::{Question, QuestionKind, QuestionOption};
pub use service::Service;
