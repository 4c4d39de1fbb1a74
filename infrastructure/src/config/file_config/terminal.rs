//! Terminal settings: the `[output]` and `[repl]` sections
//!
//! ```toml
//! [output]
//! format = "full"   # or "answer", "json"
//! color = false
//!
//! [repl]
//! show_progress = false
//! history_file = "~/.local/share/llm-council/history.txt"
//! ```

use council_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[output]`: how results are printed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Unset means the CLI default (`answer`); `--output` always wins
    pub format: Option<OutputFormat>,
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// `[repl]`: chat mode behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Progress bars while the council deliberates
    pub show_progress: bool,
    /// Line-editor history; unset uses the platform data directory
    pub history_file: Option<PathBuf>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use council_domain::OutputFormat;
    use std::path::PathBuf;

    #[test]
    fn test_terminal_sections() {
        let config: super::super::FileConfig = toml::from_str(
            r#"
[output]
format = "json"
color = false

[repl]
history_file = "/tmp/council-history"
"#,
        )
        .unwrap();

        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(config.repl.show_progress);
        assert_eq!(
            config.repl.history_file,
            Some(PathBuf::from("/tmp/council-history"))
        );
    }

    #[test]
    fn test_unset_format_stays_unset() {
        let config: super::super::FileConfig = toml::from_str("[output]\ncolor = true\n").unwrap();
        assert_eq!(config.output.format, None);
    }
}
