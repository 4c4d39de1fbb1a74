//! Consult-and-vote use case
//!
//! Every provider answers; the answer sharing the most vocabulary with the
//! others wins.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::error::DeliberationError;
use crate::use_cases::fan_out::FanOutUseCase;
use crate::use_cases::panel::ProviderPanel;
use council_domain::{Question, VoteResult, score, select_best};
use tracing::info;

/// Use case for vote mode
pub struct ConsultVoteUseCase {
    panel: ProviderPanel,
}

impl ConsultVoteUseCase {
    pub fn new(panel: ProviderPanel) -> Self {
        Self { panel }
    }

    pub async fn execute(&self, question: &Question) -> Result<VoteResult, DeliberationError> {
        self.execute_with_progress(question, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        question: &Question,
        progress: &dyn ProgressNotifier,
    ) -> Result<VoteResult, DeliberationError> {
        info!("Starting vote with {} providers", self.panel.len());

        let responses = FanOutUseCase::new(self.panel.clone())
            .query_all_with_progress(question.as_str(), progress)
            .await;

        let confidence = score(&responses);
        let (optimal_answer, selected_provider) = select_best(&responses, &confidence)
            .map(|(answer, provider)| (answer.to_string(), provider.to_string()))
            .ok_or(DeliberationError::AllProvidersFailed)?;

        info!(
            "Selected {} with confidence {:.2}",
            selected_provider,
            confidence.get(&selected_provider).unwrap_or(0.0)
        );

        Ok(VoteResult {
            question: question.as_str().to_string(),
            responses,
            confidence,
            selected_provider,
            optimal_answer,
        })
    }
}
