//! Council configuration from TOML (`[council]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [council]
//! mode = "vote"   # or "synthesize", "sequential", "summarize"
//! ```

use council_domain::{ConfigIssue, ConfigIssueCode, DeliberationMode};
use serde::{Deserialize, Serialize};

/// Raw council configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Default deliberation mode when the CLI does not pick one
    pub mode: String,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            mode: DeliberationMode::default().as_str().to_string(),
        }
    }
}

impl FileCouncilConfig {
    /// Parse the mode string, falling back to the default mode on error
    pub fn parse_mode(&self) -> (DeliberationMode, Vec<ConfigIssue>) {
        match self.mode.parse::<DeliberationMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "council.mode".to_string(),
                        value: self.mode.clone(),
                        valid_values: DeliberationMode::all()
                            .iter()
                            .map(|m| m.as_str().to_string())
                            .collect(),
                    },
                    format!(
                        "council.mode: unknown value '{}', falling back to '{}'",
                        self.mode,
                        DeliberationMode::default()
                    ),
                );
                (DeliberationMode::default(), vec![issue])
            }
        }
    }
}
