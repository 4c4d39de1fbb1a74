//! Logging infrastructure: the deliberation transcript.
//!
//! Provides [`JsonlTranscriptLogger`], a JSONL file writer that implements
//! the [`TranscriptLogger`](council_application::TranscriptLogger) port.

mod transcript;

pub use transcript::JsonlTranscriptLogger;
