//! Response cache port
//!
//! Answers are keyed by `(prompt, provider)`. Implementations must be safe
//! to share between the concurrent calls of a fan-out.

pub trait ResponseCache: Send + Sync {
    /// Cached answer for this prompt and provider, if any
    fn get(&self, prompt: &str, provider: &str) -> Option<String>;

    /// Store an answer, evicting older entries as the implementation sees fit
    fn set(&self, prompt: &str, provider: &str, response: &str);

    /// Drop every entry
    fn clear(&self);

    /// Number of cached entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
