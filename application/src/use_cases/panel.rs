//! The providers of one council and how they may be called

use crate::config::TimeoutPolicy;
use crate::ports::llm_provider::LlmProvider;
use crate::ports::transcript::{NoTranscript, TranscriptEvent, TranscriptLogger};
use crate::use_cases::error::{DeliberationError, ProviderFailure};
use crate::use_cases::shared::query_bounded;
use council_domain::Phase;
use serde_json::json;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Immutable, non-empty set of uniquely named providers.
///
/// Cloning is cheap; every clone shares the same providers, timeout
/// policy and transcript.
#[derive(Clone)]
pub struct ProviderPanel {
    providers: Arc<[Arc<dyn LlmProvider>]>,
    timeouts: Arc<TimeoutPolicy>,
    transcript: Arc<dyn TranscriptLogger>,
}

impl ProviderPanel {
    /// Validate and freeze the provider list.
    ///
    /// Registration order is kept: it decides iteration order of every
    /// result map, tie-breaking, and who synthesizes or refines first.
    pub fn new(
        providers: Vec<Arc<dyn LlmProvider>>,
        timeouts: TimeoutPolicy,
    ) -> Result<Self, DeliberationError> {
        if providers.is_empty() {
            return Err(DeliberationError::NoProviders);
        }

        let mut seen = HashSet::new();
        for provider in &providers {
            if !seen.insert(provider.name().to_string()) {
                return Err(DeliberationError::DuplicateProvider(
                    provider.name().to_string(),
                ));
            }
        }

        Ok(Self {
            providers: providers.into(),
            timeouts: Arc::new(timeouts),
            transcript: Arc::new(NoTranscript),
        })
    }

    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.transcript = transcript;
        self
    }

    pub fn providers(&self) -> &[Arc<dyn LlmProvider>] {
        &self.providers
    }

    /// First-registered provider: synthesizer, summarizer, chain head
    pub fn lead(&self) -> &Arc<dyn LlmProvider> {
        // non-empty by construction
        &self.providers[0]
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn timeouts(&self) -> &TimeoutPolicy {
        &self.timeouts
    }

    pub fn timeout_for(&self, provider: &dyn LlmProvider) -> Duration {
        self.timeouts.timeout_for(provider.name(), provider.class())
    }

    pub fn transcript(&self) -> &dyn TranscriptLogger {
        self.transcript.as_ref()
    }

    /// One bounded call, logged to tracing and the transcript
    pub async fn call(
        &self,
        provider: &dyn LlmProvider,
        phase: Phase,
        prompt: &str,
    ) -> Result<String, ProviderFailure> {
        let timeout = self.timeout_for(provider);
        debug!(
            "Querying {} for {} (timeout {}s)",
            provider.name(),
            phase.as_str(),
            timeout.as_secs_f64()
        );

        let started = Instant::now();
        let result = query_bounded(provider, prompt, timeout).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(text) => {
                debug!("{} answered in {}ms", provider.name(), elapsed_ms);
                self.transcript.log(TranscriptEvent::new(
                    "provider_reply",
                    json!({
                        "phase": phase.as_str(),
                        "provider": provider.name(),
                        "prompt": prompt,
                        "response": text,
                        "elapsed_ms": elapsed_ms,
                    }),
                ));
            }
            Err(e) => {
                warn!("{} failed during {}: {}", provider.name(), phase.as_str(), e);
                self.transcript.log(TranscriptEvent::new(
                    "provider_failure",
                    json!({
                        "phase": phase.as_str(),
                        "provider": provider.name(),
                        "prompt": prompt,
                        "error": e.to_string(),
                        "timeout": e.is_timeout(),
                        "elapsed_ms": elapsed_ms,
                    }),
                ));
            }
        }

        result
    }
}

impl fmt::Debug for ProviderPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderPanel")
            .field("providers", &self.names())
            .field("timeouts", &self.timeouts)
            .finish()
    }
}
