//! Lexical-agreement voting over a set of answers.
//!
//! Confidence here is a proxy: an answer scores high when it shares many
//! words with the other answers. It rewards agreement, not correctness.
//!
//! ```text
//! responses ──► pairwise jaccard ──► per-provider sum ──► ÷ max ──► winner
//! ```

pub mod confidence;
pub mod similarity;

pub use confidence::{score, select_best};
pub use similarity::{similarity, word_set};
