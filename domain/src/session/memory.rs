//! Bounded conversation history.
//!
//! Two limits apply: the number of retained messages, and an approximate
//! token budget applied when the history is replayed into a prompt. Neither
//! changes what the council does with the prompt it is given.

use super::entities::{Message, Role};

/// Default number of messages retained
pub const DEFAULT_MAX_HISTORY: usize = 10;

/// Default token budget for replayed context
pub const DEFAULT_MAX_TOKENS: usize = 2000;

/// Conversation history for multi-turn chat
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    history: Vec<Message>,
    max_history: usize,
    max_tokens: usize,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY, DEFAULT_MAX_TOKENS)
    }
}

impl ConversationMemory {
    pub fn new(max_history: usize, max_tokens: usize) -> Self {
        Self {
            history: Vec::new(),
            max_history,
            max_tokens,
        }
    }

    /// Append a message, dropping the oldest ones beyond `max_history`
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) {
        self.history.push(Message::new(role, content));
        if self.history.len() > self.max_history {
            let excess = self.history.len() - self.max_history;
            self.history.drain(..excess);
        }
    }

    /// Most recent messages that fit in `max_tokens`, oldest first.
    ///
    /// Walks backwards from the newest message and stops at the first one
    /// that would overflow the budget.
    pub fn context(&self, max_tokens: usize) -> Vec<&Message> {
        let mut total = 0;
        let mut context: Vec<&Message> = Vec::new();
        for message in self.history.iter().rev() {
            let tokens = message.estimated_tokens();
            if total + tokens > max_tokens {
                break;
            }
            total += tokens;
            context.push(message);
        }
        context.reverse();
        context
    }

    /// Prefix `new_prompt` with the replayable history, if any
    pub fn build_prompt_with_context(&self, new_prompt: &str) -> String {
        let context = self.context(self.max_tokens);
        if context.is_empty() {
            return new_prompt.to_string();
        }

        let history = context
            .iter()
            .map(|m| format!("{}: {}", m.role.title(), m.content))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Previous conversation:\n{}\n\nUser: {}\nAssistant:",
            history, new_prompt
        )
    }

    pub fn messages(&self) -> &[Message] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}
