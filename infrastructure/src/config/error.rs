//! Configuration loading errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}
