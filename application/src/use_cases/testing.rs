//! Mock providers shared by the use case tests

use crate::ports::llm_provider::{LlmProvider, ProviderError};
use async_trait::async_trait;
use council_domain::ProviderClass;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Provider with scripted replies, an optional delay and a call log
pub struct MockProvider {
    name: String,
    class: ProviderClass,
    default_reply: String,
    scripted: Mutex<VecDeque<Result<String, ProviderError>>>,
    delay: Option<Duration>,
    failing: bool,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            class: ProviderClass::Remote,
            default_reply: format!("answer from {}", name),
            scripted: Mutex::new(VecDeque::new()),
            delay: None,
            failing: false,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Reply used once the scripted replies run out
    pub fn with_reply(mut self, reply: &str) -> Self {
        self.default_reply = reply.to_string();
        self
    }

    /// Replies returned in order, one per call
    pub fn with_replies(self, replies: Vec<Result<String, ProviderError>>) -> Self {
        *self.scripted.lock().unwrap() = VecDeque::from(replies);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn local(mut self) -> Self {
        self.class = ProviderClass::Local;
        self
    }

    /// Every call fails with an HTTP 500
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn class(&self) -> ProviderClass {
        self.class
    }

    async fn query(&self, prompt: &str, _model: Option<&str>) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing {
            return Err(ProviderError::Http {
                status: 500,
                body: "internal error".to_string(),
            });
        }

        let scripted = self.scripted.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(self.default_reply.clone()))
    }
}

/// Erase a list of mocks into the provider list the council takes
pub fn as_providers(mocks: &[Arc<MockProvider>]) -> Vec<Arc<dyn LlmProvider>> {
    mocks
        .iter()
        .map(|m| Arc::clone(m) as Arc<dyn LlmProvider>)
        .collect()
}
