//! Structured flow transcripts

pub mod jsonl_logger;

pub use jsonl_logger::JsonlFlowLogger;
