//! Errors raised by council entry points

use crate::ports::llm_provider::ProviderError;
use council_domain::{DeliberationMode, DomainError, RefinementStage, ReplyFailure};
use std::time::Duration;
use thiserror::Error;

/// Why a single bounded provider call produced no answer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderFailure {
    #[error("timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },

    #[error(transparent)]
    Upstream(#[from] ProviderError),
}

impl ProviderFailure {
    /// True for the council's own deadline and for a provider whose
    /// client gave up first
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ProviderFailure::Timeout { .. } | ProviderFailure::Upstream(ProviderError::Timeout)
        )
    }

    /// In-band marker stored in a result map slot
    pub fn to_reply_failure(&self) -> ReplyFailure {
        match self {
            ProviderFailure::Timeout { after } => ReplyFailure::timeout(*after),
            ProviderFailure::Upstream(e @ ProviderError::Timeout) => {
                ReplyFailure::timed_out(e.to_string())
            }
            ProviderFailure::Upstream(e) => ReplyFailure::upstream(e.to_string()),
        }
    }
}

/// Errors that end a deliberation.
///
/// Per-provider failures inside a fan-out never show up here; they are
/// recorded in the result maps instead.
#[derive(Error, Debug)]
pub enum DeliberationError {
    #[error("No providers configured")]
    NoProviders,

    #[error("Duplicate provider name: {0}")]
    DuplicateProvider(String),

    #[error("{mode} mode needs at least {required} providers, {available} configured")]
    NotEnoughProviders {
        mode: DeliberationMode,
        required: usize,
        available: usize,
    },

    #[error("Invalid question: {0}")]
    InvalidQuestion(#[from] DomainError),

    #[error("All providers failed to respond")]
    AllProvidersFailed,

    #[error("Synthesis by {provider} failed: {source}")]
    SynthesisFailed { provider: String, source: ProviderFailure },

    #[error("Refinement step {stage} by {provider} failed: {source}")]
    RefinementStepFailed {
        stage: RefinementStage,
        provider: String,
        source: ProviderFailure,
    },

    #[error("Summary by {provider} failed: {source}")]
    SummaryFailed { provider: String, source: ProviderFailure },
}

impl DeliberationError {
    /// Whether the deliberation ended because a provider call timed out
    pub fn is_timeout(&self) -> bool {
        match self {
            DeliberationError::SynthesisFailed { source, .. }
            | DeliberationError::RefinementStepFailed { source, .. }
            | DeliberationError::SummaryFailed { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// The provider whose failure ended the deliberation, if any
    pub fn failed_provider(&self) -> Option<&str> {
        match self {
            DeliberationError::SynthesisFailed { provider, .. }
            | DeliberationError::RefinementStepFailed { provider, .. }
            | DeliberationError::SummaryFailed { provider, .. } => Some(provider),
            _ => None,
        }
    }
}
