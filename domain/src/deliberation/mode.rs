//! Deliberation mode selection.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four coexisting ways a council can answer a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliberationMode {
    /// Fan out, score lexical agreement, return the most agreed-upon answer
    Vote,
    /// Fan out, cross-critique, merge everything through one synthesizer
    #[default]
    Synthesize,
    /// Baseline from the first provider, improved in turn by each other one
    Sequential,
    /// Single provider, short bullet-point summary
    Summarize,
}

impl DeliberationMode {
    pub fn all() -> [DeliberationMode; 4] {
        [
            DeliberationMode::Vote,
            DeliberationMode::Synthesize,
            DeliberationMode::Sequential,
            DeliberationMode::Summarize,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliberationMode::Vote => "vote",
            DeliberationMode::Synthesize => "synthesize",
            DeliberationMode::Sequential => "sequential",
            DeliberationMode::Summarize => "summarize",
        }
    }

    /// Minimum number of providers the mode can run with
    pub fn min_providers(&self) -> usize {
        match self {
            DeliberationMode::Sequential => 2,
            _ => 1,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DeliberationMode::Vote => "Vote: every provider answers, the most agreed-upon answer wins",
            DeliberationMode::Synthesize => {
                "Synthesize: every provider answers and critiques the others, one merges"
            }
            DeliberationMode::Sequential => {
                "Sequential: the first provider answers, each following one refines"
            }
            DeliberationMode::Summarize => "Summarize: one provider, a few short bullet points",
        }
    }
}

impl fmt::Display for DeliberationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DeliberationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vote" | "consult" => Ok(DeliberationMode::Vote),
            "synthesize" | "synthesis" | "all" => Ok(DeliberationMode::Synthesize),
            "sequential" | "refine" => Ok(DeliberationMode::Sequential),
            "summarize" | "summary" => Ok(DeliberationMode::Summarize),
            other => Err(DomainError::InvalidMode(other.to_string())),
        }
    }
}
