//! Flow vocabulary
//!
//! The types exchanged between the caller and the engine across a
//! multi-turn traversal: the append-only answer history, the node handed
//! back each turn, and the derived session state.

pub mod answer;
pub mod node;
pub mod state;

pub use answer::{Answer, AnswerValue};
pub use node::FlowNode;
pub use state::FlowState;
