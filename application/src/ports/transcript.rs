//! Port for structured transcript logging.
//!
//! Defines the [`TranscriptLogger`] trait for recording deliberation events
//! (questions, provider answers, critiques, refinement steps, final answers)
//! to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the full exchange
//! with every provider in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured transcript event.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields. The adapter adds the timestamp when writing.
#[derive(Debug, Clone)]
pub struct TranscriptEvent {
    /// Event type identifier (e.g. "question", "provider_reply", "final_answer").
    pub event_type: &'static str,
    pub payload: Value,
}

impl TranscriptEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging transcript events.
///
/// `log` is synchronous and infallible; write failures are the adapter's
/// concern and never abort a deliberation.
pub trait TranscriptLogger: Send + Sync {
    fn log(&self, event: TranscriptEvent);
}

/// No-op implementation for tests and when no transcript is requested.
pub struct NoTranscript;

impl TranscriptLogger for NoTranscript {
    fn log(&self, _event: TranscriptEvent) {}
}
