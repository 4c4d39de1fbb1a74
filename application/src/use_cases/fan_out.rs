//! Fan-out use case
//!
//! Sends the same prompt to every provider at once and collects one reply
//! per provider.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::panel::ProviderPanel;
use crate::use_cases::shared::{fan_out, to_response_set};
use council_domain::{Phase, PromptTemplate, ResponseSet};
use tracing::info;

/// Use case for querying every provider concurrently
pub struct FanOutUseCase {
    panel: ProviderPanel,
}

impl FanOutUseCase {
    pub fn new(panel: ProviderPanel) -> Self {
        Self { panel }
    }

    /// Ask every provider the question under the concise-answer instruction
    pub async fn query_all(&self, question: &str) -> ResponseSet {
        self.query_all_with_progress(question, &NoProgress).await
    }

    pub async fn query_all_with_progress(
        &self,
        question: &str,
        progress: &dyn ProgressNotifier,
    ) -> ResponseSet {
        let prompt = PromptTemplate::concise_answer(question);
        self.send_all(&prompt, progress).await
    }

    /// Send `prompt` verbatim to every provider.
    ///
    /// Never fails: timeouts and provider errors land in the provider's own
    /// slot, and the returned set holds exactly one entry per provider.
    pub async fn send_all(&self, prompt: &str, progress: &dyn ProgressNotifier) -> ResponseSet {
        info!("Fan-out to {} providers", self.panel.len());

        let tasks: Vec<_> = self
            .panel
            .providers()
            .iter()
            .map(|p| (p.clone(), prompt.to_string()))
            .collect();
        let outcomes = fan_out(&self.panel, Phase::Initial, &tasks, progress).await;
        let responses = to_response_set(&outcomes);

        info!(
            "Fan-out complete: {}/{} providers answered",
            responses.success_count(),
            responses.len()
        );
        responses
    }
}
