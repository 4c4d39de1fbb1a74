//! Application layer for llm-council
//!
//! This crate contains use cases, port definitions, the [`Council`] facade
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod council;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::TimeoutPolicy;
pub use council::Council;
pub use ports::{
    llm_provider::{LlmProvider, ProviderError},
    progress::{NoProgress, ProgressNotifier},
    response_cache::ResponseCache,
    transcript::{NoTranscript, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::error::{DeliberationError, ProviderFailure};
pub use use_cases::panel::ProviderPanel;
