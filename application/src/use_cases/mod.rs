//! Use cases - the application's entry points

pub mod advance_flow;
pub mod list_goals;
