//! Caching decorator for any provider

use async_trait::async_trait;
use council_application::{LlmProvider, ProviderError, ResponseCache};
use council_domain::ProviderClass;
use std::sync::Arc;
use tracing::debug;

/// Wraps a provider so identical prompts are answered from a shared cache.
///
/// Only successful replies are stored. Calls with a model override are
/// keyed separately from calls without one.
pub struct CachedProvider {
    inner: Arc<dyn LlmProvider>,
    cache: Arc<dyn ResponseCache>,
}

impl CachedProvider {
    pub fn new(inner: Arc<dyn LlmProvider>, cache: Arc<dyn ResponseCache>) -> Self {
        Self { inner, cache }
    }

    fn cache_key(prompt: &str, model: Option<&str>) -> String {
        match model {
            Some(model) => format!("[model:{}]\n{}", model, prompt),
            None => prompt.to_string(),
        }
    }
}

#[async_trait]
impl LlmProvider for CachedProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn class(&self) -> ProviderClass {
        self.inner.class()
    }

    async fn query(&self, prompt: &str, model: Option<&str>) -> Result<String, ProviderError> {
        let key = Self::cache_key(prompt, model);
        if let Some(hit) = self.cache.get(&key, self.inner.name()) {
            debug!(provider = %self.inner.name(), "Cache hit");
            return Ok(hit);
        }

        let response = self.inner.query(prompt, model).await?;
        self.cache.set(&key, self.inner.name(), &response);
        Ok(response)
    }
}
