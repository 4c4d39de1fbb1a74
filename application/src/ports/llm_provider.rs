//! LLM provider port
//!
//! Defines the interface every council member implements. Adapters for
//! hosted and local backends live in the infrastructure layer.

use async_trait::async_trait;
use council_domain::ProviderClass;
use thiserror::Error;

/// Errors a single provider call can produce
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A named LLM backend taking part in a council
///
/// `query` may take arbitrarily long; callers bound it with the timeout
/// for the provider's [`ProviderClass`].
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique, stable name used as the key in every result map
    fn name(&self) -> &str;

    /// Remote (hosted API) or local (self-hosted runtime)
    fn class(&self) -> ProviderClass {
        ProviderClass::Remote
    }

    /// Send a prompt and return the answer text.
    ///
    /// `model` overrides the provider's configured model for this call.
    async fn query(&self, prompt: &str, model: Option<&str>) -> Result<String, ProviderError>;
}
