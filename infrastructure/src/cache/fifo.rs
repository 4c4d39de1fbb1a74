//! Fixed-capacity cache evicting the oldest entry first.

use council_application::ports::response_cache::ResponseCache;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const DEFAULT_CAPACITY: usize = 1000;

type CacheKey = (String, String);

/// In-memory response cache keyed by `(provider, prompt)`.
///
/// Backed by an [`LruCache`] that is only ever read with `peek`, so
/// recency never changes and the least recently *inserted* key is the one
/// evicted. Overwriting an existing key keeps its position. A capacity of
/// zero disables the cache.
pub struct FifoResponseCache {
    entries: Option<Mutex<LruCache<CacheKey, String>>>,
}

impl FifoResponseCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    pub fn capacity(&self) -> usize {
        self.locked().map_or(0, |cache| cache.cap().get())
    }

    /// A panic while holding the lock cannot leave the map half-updated,
    /// so a poisoned lock is recovered rather than treated as empty.
    fn locked(&self) -> Option<MutexGuard<'_, LruCache<CacheKey, String>>> {
        self.entries
            .as_ref()
            .map(|entries| entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Default for FifoResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

fn key(prompt: &str, provider: &str) -> CacheKey {
    (provider.to_string(), prompt.to_string())
}

impl ResponseCache for FifoResponseCache {
    fn get(&self, prompt: &str, provider: &str) -> Option<String> {
        self.locked()?.peek(&key(prompt, provider)).cloned()
    }

    fn set(&self, prompt: &str, provider: &str, response: &str) {
        let Some(mut cache) = self.locked() else {
            return;
        };
        let key = key(prompt, provider);
        match cache.peek_mut(&key) {
            Some(existing) => *existing = response.to_string(),
            None => {
                cache.push(key, response.to_string());
            }
        }
    }

    fn clear(&self) {
        if let Some(mut cache) = self.locked() {
            cache.clear();
        }
    }

    fn len(&self) -> usize {
        self.locked().map_or(0, |cache| cache.len())
    }
}
