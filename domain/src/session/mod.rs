//! Conversation session domain.
//!
//! - [`entities::Message`]: a single turn of a conversation
//! - [`memory::ConversationMemory`]: bounded history that turns follow-up
//!   questions into self-contained prompts

pub mod entities;
pub mod memory;
