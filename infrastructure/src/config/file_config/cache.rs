//! Cache configuration from TOML (`[cache]` section)

use serde::{Deserialize, Serialize};

/// Raw response cache configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    /// Wrap every provider in the response cache
    pub enabled: bool,
    /// Maximum number of cached answers before the oldest is evicted
    pub capacity: usize,
}

impl Default for FileCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 1000,
        }
    }
}
