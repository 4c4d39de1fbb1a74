//! Per-call timeout policy.
//!
//! [`TimeoutPolicy`] decides how long a single provider call may take.
//! Remote and local providers get separate defaults, and individual
//! providers can be overridden by name.

use council_domain::ProviderClass;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Timeouts applied to every provider call of a deliberation.
///
/// The timeout bounds one call, not a whole stage: a slow provider only
/// ever costs its own slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutPolicy {
    pub remote: Duration,
    pub local: Duration,
    #[serde(default)]
    pub overrides: HashMap<String, Duration>,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            remote: ProviderClass::Remote.default_timeout(),
            local: ProviderClass::Local.default_timeout(),
            overrides: HashMap::new(),
        }
    }
}

impl TimeoutPolicy {
    /// Same timeout for every provider regardless of class
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            remote: timeout,
            local: timeout,
            overrides: HashMap::new(),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_remote(mut self, timeout: Duration) -> Self {
        self.remote = timeout;
        self
    }

    pub fn with_local(mut self, timeout: Duration) -> Self {
        self.local = timeout;
        self
    }

    pub fn with_override(mut self, provider: impl Into<String>, timeout: Duration) -> Self {
        self.overrides.insert(provider.into(), timeout);
        self
    }

    // ==================== Lookup ====================

    /// Timeout for one class of provider, ignoring overrides
    pub fn for_class(&self, class: ProviderClass) -> Duration {
        match class {
            ProviderClass::Remote => self.remote,
            ProviderClass::Local => self.local,
        }
    }

    /// Timeout for a named provider of the given class
    pub fn timeout_for(&self, provider: &str, class: ProviderClass) -> Duration {
        self.overrides
            .get(provider)
            .copied()
            .unwrap_or_else(|| self.for_class(class))
    }
}
