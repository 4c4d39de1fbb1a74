//! Provider class value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where a provider runs, which decides how long we are willing to wait for it.
///
/// Cloud APIs answer in seconds; a local inference server on a laptop can
/// need minutes for the same prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderClass {
    /// Hosted API reached over the network (Groq, Mistral, ...)
    #[default]
    Remote,
    /// Inference server on the local machine (Ollama)
    Local,
}

impl ProviderClass {
    /// Default per-call timeout for this class
    pub fn default_timeout(&self) -> Duration {
        match self {
            ProviderClass::Remote => Duration::from_secs(30),
            ProviderClass::Local => Duration::from_secs(120),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderClass::Remote => "remote",
            ProviderClass::Local => "local",
        }
    }
}

impl std::fmt::Display for ProviderClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" | "cloud" => Ok(ProviderClass::Remote),
            "local" => Ok(ProviderClass::Local),
            other => Err(DomainError::InvalidProviderClass(other.to_string())),
        }
    }
}
