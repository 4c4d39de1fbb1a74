//! Summarize use case
//!
//! A single call to the first-registered provider asking for a handful of
//! short bullet points.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::error::DeliberationError;
use crate::use_cases::panel::ProviderPanel;
use council_domain::{Phase, PromptTemplate, Question, SummaryResult};
use tracing::info;

/// Use case for summarize mode
pub struct SummarizeUseCase {
    panel: ProviderPanel,
}

impl SummarizeUseCase {
    pub fn new(panel: ProviderPanel) -> Self {
        Self { panel }
    }

    pub async fn execute(&self, question: &Question) -> Result<SummaryResult, DeliberationError> {
        self.execute_with_progress(question, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        question: &Question,
        progress: &dyn ProgressNotifier,
    ) -> Result<SummaryResult, DeliberationError> {
        let provider = self.panel.lead();
        info!("Summary by {}", provider.name());

        progress.on_phase_start(&Phase::Summary, 1);
        let prompt = PromptTemplate::summarize_prompt(question.as_str());
        let result = self.panel.call(provider.as_ref(), Phase::Summary, &prompt).await;
        progress.on_task_complete(&Phase::Summary, provider.name(), result.is_ok());
        progress.on_phase_complete(&Phase::Summary);

        let summary = result.map_err(|source| DeliberationError::SummaryFailed {
            provider: provider.name().to_string(),
            source,
        })?;

        Ok(SummaryResult {
            question: question.as_str().to_string(),
            provider: provider.name().to_string(),
            summary,
        })
    }
}
