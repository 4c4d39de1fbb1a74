//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod cache;
mod council;
mod memory;
mod providers;
mod terminal;
mod timeouts;

pub use cache::FileCacheConfig;
pub use council::FileCouncilConfig;
pub use memory::FileMemoryConfig;
pub use providers::{FileProviderConfig, FileProvidersConfig, ProviderDefaults, ResolvedProvider};
pub use terminal::{FileOutputConfig, FileReplConfig};
pub use timeouts::FileTimeoutsConfig;

use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Default deliberation mode
    pub council: FileCouncilConfig,
    /// Per-call timeouts
    pub timeouts: FileTimeoutsConfig,
    /// Provider backends
    pub providers: FileProvidersConfig,
    /// Response cache
    pub cache: FileCacheConfig,
    /// Chat conversation memory
    pub memory: FileMemoryConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Enum parse failures (`council.mode`)
    /// 2. Zero values that would disable a feature by accident
    /// 3. Timeout overrides naming providers that are never built
    /// 4. Provider sections that leave nothing enabled
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Enum parse validation
        issues.extend(self.council.parse_mode().1);

        // 2. Zero values
        issues.extend(self.timeouts.to_policy().1);
        if self.cache.enabled && self.cache.capacity == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroValue {
                    field: "cache.capacity".to_string(),
                },
                "cache.capacity: 0 caches nothing, set cache.enabled = false instead",
            ));
        }
        if self.memory.max_history == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroValue {
                    field: "memory.max_history".to_string(),
                },
                "memory.max_history: 0 disables follow-up context in chat",
            ));
        }

        // 3. Unknown providers in timeout overrides
        let known: Vec<&str> = ProviderDefaults::all().iter().map(|d| d.name).collect();
        let mut overridden: Vec<&String> = self.timeouts.overrides.keys().collect();
        overridden.sort();
        for name in overridden {
            if !known.contains(&name.as_str()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownProvider { name: name.clone() },
                    format!(
                        "timeouts.overrides.{}: no such provider (known: {})",
                        name,
                        known.join(", ")
                    ),
                ));
            }
        }

        // 4. Nothing to build
        if !ProviderDefaults::all()
            .iter()
            .any(|d| self.providers.is_enabled(d))
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoProviderEnabled,
                "every provider is disabled, the council needs at least one",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{DeliberationMode, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[council]
mode = "vote"

[timeouts]
remote_secs = 20
local_secs = 90

[providers]
use_ollama = true

[providers.groq]
model = "llama-3.1-8b-instant"

[cache]
enabled = false

[memory]
max_history = 4

[output]
format = "full"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/llm-council/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.council.parse_mode().0, DeliberationMode::Vote);
        assert_eq!(config.timeouts.local_secs, 90);
        assert!(config.providers.use_ollama);
        assert_eq!(
            config.providers.groq.model.as_deref(),
            Some("llama-3.1-8b-instant")
        );
        assert!(!config.cache.enabled);
        assert_eq!(config.memory.max_history, 4);
        assert_eq!(config.memory.max_tokens, 2000);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.repl.show_progress);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[providers.mistral]
model = "mistral-small-latest"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.council, FileCouncilConfig::default());
        assert!(config.cache.enabled);
        assert_eq!(config.cache.capacity, 1000);
        assert!(config.output.color);
        assert!(!config.providers.use_ollama);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_unknown_override() {
        let toml_str = r#"
[timeouts.overrides]
OpenAI = 60
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::UnknownProvider { name } if name == "OpenAI"
        )));
    }

    #[test]
    fn test_validate_everything_disabled_is_error() {
        let toml_str = r#"
[providers.groq]
enabled = false

[providers.mistral]
enabled = false
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert!(issues.iter().any(|i| i.is_error()
            && i.code == ConfigIssueCode::NoProviderEnabled));
    }
}
