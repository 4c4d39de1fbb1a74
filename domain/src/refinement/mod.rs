//! Sequential refinement domain logic.
//!
//! Refiners are asked to answer in two labelled sections. [`parsing`] turns
//! that free text back into typed fields and falls back gracefully when a
//! model ignores the format.

pub mod parsing;

pub use parsing::{
    ANALYSIS_MARKER, FALLBACK_ANALYSIS, IMPROVED_MARKER, OPTIMIZED_MARKER, RefinementOutput,
    parse_refinement_output,
};
