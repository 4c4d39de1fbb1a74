//! Conversation memory configuration from TOML (`[memory]` section)

use council_domain::session::memory::{DEFAULT_MAX_HISTORY, DEFAULT_MAX_TOKENS};
use serde::{Deserialize, Serialize};

/// Raw conversation memory configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMemoryConfig {
    /// Messages kept in the chat history
    pub max_history: usize,
    /// Approximate token budget of the context prepended to a question
    pub max_tokens: usize,
}

impl Default for FileMemoryConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}
