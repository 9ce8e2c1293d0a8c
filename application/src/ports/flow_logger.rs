//! Port for structured flow transcripts.
//!
//! Defines the [`FlowLogger`] trait for recording flow events (turns
//! taken, outcomes decided) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! machine-readable turn transcript (JSONL).

use serde_json::Value;

/// A structured flow event for logging.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields; implementations stamp the timestamp.
pub struct FlowEvent {
    /// Event type identifier (e.g., "flow_started", "flow_turn").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl FlowEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging flow events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL
/// line). The `log` method is intentionally synchronous and non-fallible
/// to avoid disrupting the turn - logging failures are silently ignored.
pub trait FlowLogger: Send + Sync {
    /// Record a flow event.
    fn log(&self, event: FlowEvent);
}

/// No-op implementation for tests and when transcripts are disabled.
pub struct NoFlowLogger;

impl FlowLogger for NoFlowLogger {
    fn log(&self, _event: FlowEvent) {}
}
