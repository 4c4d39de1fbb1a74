//! Critique-and-synthesize use case
//!
//! Orchestrates the full council flow: independent answers, cross-critique,
//! then one merged answer written by the first-registered provider.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::error::DeliberationError;
use crate::use_cases::fan_out::FanOutUseCase;
use crate::use_cases::panel::ProviderPanel;
use crate::use_cases::shared::{fan_out, to_response_set};
use council_domain::{CritiqueSet, Phase, PromptTemplate, Question, ResponseSet, SynthesisResult};
use tracing::{debug, info};

/// Use case for critique-and-synthesize mode
pub struct CritiqueSynthesizeUseCase {
    panel: ProviderPanel,
}

impl CritiqueSynthesizeUseCase {
    pub fn new(panel: ProviderPanel) -> Self {
        Self { panel }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, question: &Question) -> Result<SynthesisResult, DeliberationError> {
        self.execute_with_progress(question, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        question: &Question,
        progress: &dyn ProgressNotifier,
    ) -> Result<SynthesisResult, DeliberationError> {
        info!("Starting council with {} providers", self.panel.len());

        // Phase 1: Initial answers
        let responses = FanOutUseCase::new(self.panel.clone())
            .query_all_with_progress(question.as_str(), progress)
            .await;

        if responses.success_count() == 0 {
            return Err(DeliberationError::AllProvidersFailed);
        }

        // Phase 2: Cross-critique
        let critiques = self.critique(question, &responses, progress).await;

        // Phase 3: Synthesis
        let final_answer = self
            .synthesize(question, &responses, &critiques, progress)
            .await?;

        Ok(SynthesisResult {
            question: question.as_str().to_string(),
            responses,
            critiques,
            synthesizer: self.panel.lead().name().to_string(),
            final_answer,
        })
    }

    /// Each provider critiques every other provider's answer.
    ///
    /// Critiques run concurrently, each under its own timeout. A failed
    /// critique is recorded in that provider's slot; a provider with no
    /// other answers to look at gets no entry.
    pub async fn critique(
        &self,
        question: &Question,
        responses: &ResponseSet,
        progress: &dyn ProgressNotifier,
    ) -> CritiqueSet {
        info!("Cross-critique");

        let tasks: Vec<_> = self
            .panel
            .providers()
            .iter()
            .filter_map(|provider| {
                let others: Vec<(&str, &str)> =
                    responses.answers_excluding(provider.name()).collect();
                if others.is_empty() {
                    debug!("Skipping critique by {}: nothing to review", provider.name());
                    return None;
                }
                let prompt = PromptTemplate::critique_prompt(question.as_str(), &others);
                Some((provider.clone(), prompt))
            })
            .collect();

        if tasks.is_empty() {
            debug!("Skipping critique phase");
            return CritiqueSet::new();
        }

        let outcomes = fan_out(&self.panel, Phase::Critique, &tasks, progress).await;
        to_response_set(&outcomes)
    }

    /// The first-registered provider merges answers and critiques.
    ///
    /// Failed answers and failed critiques are left out of the prompt.
    pub async fn synthesize(
        &self,
        question: &Question,
        responses: &ResponseSet,
        critiques: &CritiqueSet,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, DeliberationError> {
        let synthesizer = self.panel.lead();
        info!("Synthesis by {}", synthesizer.name());
        progress.on_phase_start(&Phase::Synthesis, 1);

        let answers: Vec<(&str, &str)> = responses.answers().collect();
        let notes: Vec<(&str, &str)> = critiques.answers().collect();
        let prompt = PromptTemplate::synthesis_prompt(question.as_str(), &answers, &notes);

        let result = self
            .panel
            .call(synthesizer.as_ref(), Phase::Synthesis, &prompt)
            .await;
        progress.on_task_complete(&Phase::Synthesis, synthesizer.name(), result.is_ok());
        progress.on_phase_complete(&Phase::Synthesis);

        result.map_err(|source| DeliberationError::SynthesisFailed {
            provider: synthesizer.name().to_string(),
            source,
        })
    }
}
