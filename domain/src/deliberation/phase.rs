//! Phases reported while a deliberation runs

use serde::{Deserialize, Serialize};

/// Phase of a deliberation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Every provider answers the question independently
    Initial,
    /// Each provider critiques the others' answers
    Critique,
    /// The synthesizer merges answers and critiques
    Synthesis,
    /// Refiners improve the running answer one after another
    Refinement,
    /// A single provider condenses the answer into bullets
    Summary,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Initial => "initial",
            Phase::Critique => "critique",
            Phase::Synthesis => "synthesis",
            Phase::Refinement => "refinement",
            Phase::Summary => "summary",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Initial => "Initial Responses",
            Phase::Critique => "Cross-Critique",
            Phase::Synthesis => "Synthesis",
            Phase::Refinement => "Sequential Refinement",
            Phase::Summary => "Summary",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
