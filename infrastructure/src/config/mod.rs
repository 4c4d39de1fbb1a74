//! Configuration file loading for llm-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COUNCIL_*` environment variables (`__` separates sections)
//! 2. Legacy variables: `USE_OLLAMA`, `GROQ_MODEL`, `OLLAMA_BASE_URL`, `OLLAMA_MODEL`
//! 3. `--config <path>` specified file
//! 4. Project root: `./council.toml` or `./.council.toml`
//! 5. XDG config: `$XDG_CONFIG_HOME/llm-council/config.toml`
//! 6. Default values
//!
//! API keys are never merged here; they are read from the variable named by
//! each provider's `api_key_env` when the provider is built.

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    FileCacheConfig, FileConfig, FileCouncilConfig, FileMemoryConfig, FileOutputConfig,
    FileProviderConfig, FileProvidersConfig, FileReplConfig, FileTimeoutsConfig, ProviderDefaults,
    ResolvedProvider,
};
pub use loader::ConfigLoader;
