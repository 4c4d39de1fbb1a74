//! Timeout configuration from TOML (`[timeouts]` section)
//!
//! ```toml
//! [timeouts]
//! remote_secs = 30
//! local_secs = 120
//!
//! [timeouts.overrides]
//! Ollama = 300
//! ```

use council_application::TimeoutPolicy;
use council_domain::{ConfigIssue, ConfigIssueCode, ProviderClass};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Raw timeout configuration from TOML, in whole seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimeoutsConfig {
    /// Per-call timeout for hosted APIs
    pub remote_secs: u64,
    /// Per-call timeout for self-hosted runtimes
    pub local_secs: u64,
    /// Per-provider overrides keyed by provider name
    pub overrides: HashMap<String, u64>,
}

impl Default for FileTimeoutsConfig {
    fn default() -> Self {
        Self {
            remote_secs: ProviderClass::Remote.default_timeout().as_secs(),
            local_secs: ProviderClass::Local.default_timeout().as_secs(),
            overrides: HashMap::new(),
        }
    }
}

impl FileTimeoutsConfig {
    /// Convert to the application policy; zero values keep the defaults
    pub fn to_policy(&self) -> (TimeoutPolicy, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut policy = TimeoutPolicy::default();

        match self.remote_secs {
            0 => issues.push(zero_issue("timeouts.remote_secs")),
            secs => policy = policy.with_remote(Duration::from_secs(secs)),
        }
        match self.local_secs {
            0 => issues.push(zero_issue("timeouts.local_secs")),
            secs => policy = policy.with_local(Duration::from_secs(secs)),
        }

        let mut names: Vec<_> = self.overrides.keys().collect();
        names.sort();
        for name in names {
            match self.overrides[name] {
                0 => issues.push(zero_issue(&format!("timeouts.overrides.{}", name))),
                secs => policy = policy.with_override(name.clone(), Duration::from_secs(secs)),
            }
        }

        (policy, issues)
    }
}

fn zero_issue(field: &str) -> ConfigIssue {
    ConfigIssue::warning(
        ConfigIssueCode::ZeroValue {
            field: field.to_string(),
        },
        format!("{}: 0 would time out every call, using the default", field),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let (policy, issues) = FileTimeoutsConfig::default().to_policy();
        assert_eq!(policy, TimeoutPolicy::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_deserialize_with_overrides() {
        let toml_str = r#"
[timeouts]
remote_secs = 10

[timeouts.overrides]
Ollama = 300
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let (policy, issues) = config.timeouts.to_policy();
        assert!(issues.is_empty());
        assert_eq!(policy.remote, Duration::from_secs(10));
        assert_eq!(policy.local, Duration::from_secs(120));
        assert_eq!(
            policy.timeout_for("Ollama", ProviderClass::Local),
            Duration::from_secs(300)
        );
    }

    #[test]
    fn test_zero_is_reported_and_ignored() {
        let config = FileTimeoutsConfig {
            remote_secs: 0,
            ..Default::default()
        };
        let (policy, issues) = config.to_policy();
        assert_eq!(policy.remote, Duration::from_secs(30));
        assert!(matches!(
            &issues[0].code,
            ConfigIssueCode::ZeroValue { field } if field == "timeouts.remote_secs"
        ));
    }
}
