//! Interactive flow front-end

pub mod repl;

pub use repl::FlowRepl;
