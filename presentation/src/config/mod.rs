//! Presentation-level configuration
//!
//! Chat REPL settings resolved from the `[repl]` and `[memory]` sections.

use council_domain::session::memory::{DEFAULT_MAX_HISTORY, DEFAULT_MAX_TOKENS};
use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct ReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to history file; `None` uses the platform data directory
    pub history_file: Option<PathBuf>,
    /// Conversation messages kept between questions
    pub max_history: usize,
    /// Approximate token budget for replayed conversation
    pub max_tokens: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            max_history: DEFAULT_MAX_HISTORY,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl ReplConfig {
    /// Where line-editor history is stored
    ///
    /// A leading `~/` in the configured path is expanded to the home directory.
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(path) => match path.strip_prefix("~") {
                Ok(rest) => dirs::home_dir().map(|home| home.join(rest)),
                Err(_) => Some(path.clone()),
            },
            None => dirs::data_dir().map(|p| p.join("llm-council").join("history.txt")),
        }
    }
}
