//! Application-level configuration.
//!
//! - [`TimeoutPolicy`] - how long one provider call may take

pub mod timeout_policy;

pub use timeout_policy::TimeoutPolicy;
