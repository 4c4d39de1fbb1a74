//! Domain layer for llm-council
//!
//! This crate contains the core types and pure algorithms of a deliberation.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! Several independent text-generation providers answer the same question;
//! their outputs are combined into one answer. Four modes coexist:
//!
//! - **Vote**: the answer sharing the most words with the others wins
//! - **Synthesize**: answers are cross-critiqued, then merged by one provider
//! - **Sequential**: a baseline is improved by each provider in turn
//! - **Summarize**: one provider, a handful of bullet points
//!
//! ## Failure tiers
//!
//! A provider failing during a fan-out is data ([`ProviderReply::Failed`]);
//! a dependent stage failing is an error raised by the application layer.

pub mod config;
pub mod consensus;
pub mod core;
pub mod deliberation;
pub mod prompt;
pub mod refinement;
pub mod session;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use consensus::{score, select_best, similarity};
pub use crate::core::{
    error::DomainError,
    provider::ProviderClass,
    question::Question,
    string::{one_line_preview, truncate},
};
pub use deliberation::{
    mode::DeliberationMode,
    phase::Phase,
    reply::{FailureKind, ProviderReply, ReplyFailure},
    value_objects::{
        ConfidenceMap, CritiqueSet, DeliberationResult, RefinementResult, RefinementStage,
        RefinementStep, ResponseSet, SummaryResult, SynthesisResult, VoteResult,
    },
};
pub use prompt::PromptTemplate;
pub use refinement::{FALLBACK_ANALYSIS, RefinementOutput, parse_refinement_output};
pub use session::{
    entities::{Message, Role},
    memory::ConversationMemory,
};
