//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::ProviderClass`]: remote vs local backends, drives timeouts
//! - [`question::Question`]: a validated question to pose to the council
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod provider;
pub mod question;
pub mod string;
