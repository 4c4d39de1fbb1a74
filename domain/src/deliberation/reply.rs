//! A single provider's contribution to a fan-out stage.
//!
//! Fan-out and critique stages never fail as a whole because one backend
//! misbehaved. Instead the failure is stored in that provider's slot as a
//! [`ProviderReply::Failed`], next to the answers of everyone else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Why a provider slot holds no answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The call exceeded its timeout
    Timeout,
    /// The provider returned an error (transport, HTTP status, bad payload)
    Upstream,
}

/// In-band failure marker for one provider slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ReplyFailure {
    pub fn timeout(after: Duration) -> Self {
        Self {
            kind: FailureKind::Timeout,
            message: format!("timed out after {}s", after.as_secs()),
        }
    }

    /// Timeout reported by the backend itself, duration unknown
    pub fn timed_out(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Timeout,
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Upstream,
            message: message.into(),
        }
    }
}

impl fmt::Display for ReplyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.message)
    }
}

/// Answer text, or the reason there is none
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderReply {
    Answer(String),
    Failed(ReplyFailure),
}

impl ProviderReply {
    pub fn answer(text: impl Into<String>) -> Self {
        ProviderReply::Answer(text.into())
    }

    pub fn failed(failure: ReplyFailure) -> Self {
        ProviderReply::Failed(failure)
    }

    /// The answer text, if the provider produced one
    pub fn text(&self) -> Option<&str> {
        match self {
            ProviderReply::Answer(text) => Some(text),
            ProviderReply::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ReplyFailure> {
        match self {
            ProviderReply::Answer(_) => None,
            ProviderReply::Failed(failure) => Some(failure),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProviderReply::Answer(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ProviderReply::Failed(ReplyFailure {
                kind: FailureKind::Timeout,
                ..
            })
        )
    }
}

/// Renders the answer itself, or the `Error: ...` marker for a failed slot.
impl fmt::Display for ProviderReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderReply::Answer(text) => write!(f, "{}", text),
            ProviderReply::Failed(failure) => write!(f, "{}", failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_marker_is_recognizable() {
        let reply = ProviderReply::failed(ReplyFailure::timeout(Duration::from_secs(30)));
        assert!(reply.is_timeout());
        assert!(!reply.is_success());
        assert_eq!(reply.to_string(), "Error: timed out after 30s");
    }

    #[test]
    fn test_upstream_failure_is_not_timeout() {
        let reply = ProviderReply::failed(ReplyFailure::upstream("HTTP 500"));
        assert!(!reply.is_timeout());
        assert_eq!(reply.text(), None);
        assert_eq!(reply.to_string(), "Error: HTTP 500");
    }

    #[test]
    fn test_answer_display_is_verbatim() {
        let reply = ProviderReply::answer("  spaced\n");
        assert_eq!(reply.text(), Some("  spaced\n"));
        assert_eq!(reply.to_string(), "  spaced\n");
    }
}
