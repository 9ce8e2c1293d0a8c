//! Presentation layer for service-compass
//!
//! This crate contains CLI definitions, output formatters, and the
//! interactive flow REPL.

pub mod cli;
pub mod flow;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use flow::FlowRepl;
pub use output::console::ConsoleFormatter;
