//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP providers, the response cache,
//! transcript logging, and configuration file loading.

pub mod cache;
pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use cache::{DEFAULT_CAPACITY, FifoResponseCache};
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use logging::JsonlTranscriptLogger;
pub use providers::{
    CachedProvider, OllamaProvider, OpenAiCompatProvider, build_providers, build_providers_with,
};
