//! How a deliberation result is rendered

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendering of a [`DeliberationResult`](crate::DeliberationResult)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every stage: answers, critiques or chain, then the final answer
    Full,
    /// The final answer with a one-line attribution
    #[default]
    Answer,
    /// The whole result as pretty-printed JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Full => "full",
            OutputFormat::Answer => "answer",
            OutputFormat::Json => "json",
        }
    }

    /// Whether the output is meant for a program rather than a person
    pub fn is_machine_readable(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(OutputFormat::Full),
            "answer" | "final" => Ok(OutputFormat::Answer),
            "json" => Ok(OutputFormat::Json),
            other => Err(DomainError::InvalidOutputFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_is_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Answer);
        assert!(!OutputFormat::default().is_machine_readable());
    }

    #[test]
    fn test_parse_accepts_alias_and_case() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" final ".parse::<OutputFormat>().unwrap(), OutputFormat::Answer);
        assert!(matches!(
            "yaml".parse::<OutputFormat>(),
            Err(DomainError::InvalidOutputFormat(f)) if f == "yaml"
        ));
    }

    #[test]
    fn test_serde_matches_display() {
        for format in [OutputFormat::Full, OutputFormat::Answer, OutputFormat::Json] {
            let json = serde_json::to_string(&format).unwrap();
            assert_eq!(json, format!("\"{}\"", format));
        }
    }
}
