//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Unknown deliberation mode: {0} (expected vote, synthesize, sequential or summarize)")]
    InvalidMode(String),

    #[error("Unknown output format: {0} (expected full, answer or json)")]
    InvalidOutputFormat(String),

    #[error("Unknown provider class: {0} (expected remote or local)")]
    InvalidProviderClass(String),

    #[error("Unknown message role: {0}")]
    InvalidRole(String),
}
