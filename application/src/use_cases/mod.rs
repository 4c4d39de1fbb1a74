//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod consult_vote;
pub mod critique_synthesize;
pub mod error;
pub mod fan_out;
pub mod panel;
pub mod sequential_refine;
pub(crate) mod shared;
pub mod summarize;

#[cfg(test)]
pub(crate) mod testing;
