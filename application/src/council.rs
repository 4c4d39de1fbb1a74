//! Council facade
//!
//! [`Council`] is the single entry point the outer layers talk to. It owns
//! the provider panel and hands it to the use case of the requested mode.

use crate::config::TimeoutPolicy;
use crate::ports::llm_provider::LlmProvider;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::transcript::{TranscriptEvent, TranscriptLogger};
use crate::use_cases::consult_vote::ConsultVoteUseCase;
use crate::use_cases::critique_synthesize::CritiqueSynthesizeUseCase;
use crate::use_cases::error::DeliberationError;
use crate::use_cases::fan_out::FanOutUseCase;
use crate::use_cases::panel::ProviderPanel;
use crate::use_cases::sequential_refine::SequentialRefineUseCase;
use crate::use_cases::summarize::SummarizeUseCase;
use council_domain::{
    DeliberationMode, DeliberationResult, Question, RefinementResult, ResponseSet, SummaryResult,
    SynthesisResult, VoteResult,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// A fixed set of providers that answer questions together.
///
/// Holds no per-question state: the question is passed to every call, and
/// one `Council` can serve concurrent calls from clones of itself.
#[derive(Clone, Debug)]
pub struct Council {
    panel: ProviderPanel,
}

impl Council {
    /// Fails on an empty provider list or repeated provider names
    pub fn new(
        providers: Vec<Arc<dyn LlmProvider>>,
        timeouts: TimeoutPolicy,
    ) -> Result<Self, DeliberationError> {
        let panel = ProviderPanel::new(providers, timeouts)?;
        info!("Council ready: {}", panel.names().join(", "));
        Ok(Self { panel })
    }

    /// Record every provider call and final result to `transcript`
    pub fn with_transcript(mut self, transcript: Arc<dyn TranscriptLogger>) -> Self {
        self.panel = self.panel.with_transcript(transcript);
        self
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.panel.names()
    }

    pub fn len(&self) -> usize {
        self.panel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panel.is_empty()
    }

    pub fn timeouts(&self) -> &TimeoutPolicy {
        self.panel.timeouts()
    }

    /// Modes this council has enough providers for
    pub fn supported_modes(&self) -> Vec<DeliberationMode> {
        DeliberationMode::all()
            .into_iter()
            .filter(|mode| self.len() >= mode.min_providers())
            .collect()
    }

    // ==================== Entry Points ====================

    /// Raw fan-out: every provider's answer, failures in-band
    pub async fn query_all(&self, question: &str) -> ResponseSet {
        FanOutUseCase::new(self.panel.clone())
            .query_all(question)
            .await
    }

    pub async fn consult_vote(&self, question: &str) -> Result<VoteResult, DeliberationError> {
        self.consult_vote_with_progress(question, &NoProgress).await
    }

    pub async fn consult_vote_with_progress(
        &self,
        question: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<VoteResult, DeliberationError> {
        let question = parse_question(question)?;
        ConsultVoteUseCase::new(self.panel.clone())
            .execute_with_progress(&question, progress)
            .await
    }

    pub async fn consult_synthesize(
        &self,
        question: &str,
    ) -> Result<SynthesisResult, DeliberationError> {
        self.consult_synthesize_with_progress(question, &NoProgress)
            .await
    }

    pub async fn consult_synthesize_with_progress(
        &self,
        question: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<SynthesisResult, DeliberationError> {
        let question = parse_question(question)?;
        CritiqueSynthesizeUseCase::new(self.panel.clone())
            .execute_with_progress(&question, progress)
            .await
    }

    pub async fn sequential_refine(
        &self,
        question: &str,
    ) -> Result<RefinementResult, DeliberationError> {
        self.sequential_refine_with_progress(question, &NoProgress)
            .await
    }

    pub async fn sequential_refine_with_progress(
        &self,
        question: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<RefinementResult, DeliberationError> {
        let question = parse_question(question)?;
        SequentialRefineUseCase::new(self.panel.clone())
            .execute_with_progress(&question, progress)
            .await
    }

    pub async fn summarize(&self, question: &str) -> Result<SummaryResult, DeliberationError> {
        self.summarize_with_progress(question, &NoProgress).await
    }

    pub async fn summarize_with_progress(
        &self,
        question: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<SummaryResult, DeliberationError> {
        let question = parse_question(question)?;
        SummarizeUseCase::new(self.panel.clone())
            .execute_with_progress(&question, progress)
            .await
    }

    /// Run the entry point selected by `mode`
    pub async fn deliberate(
        &self,
        mode: DeliberationMode,
        question: &str,
    ) -> Result<DeliberationResult, DeliberationError> {
        self.deliberate_with_progress(mode, question, &NoProgress)
            .await
    }

    pub async fn deliberate_with_progress(
        &self,
        mode: DeliberationMode,
        question: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationResult, DeliberationError> {
        self.panel.transcript().log(TranscriptEvent::new(
            "question",
            json!({ "mode": mode.as_str(), "question": question }),
        ));

        let result: Result<DeliberationResult, DeliberationError> = match mode {
            DeliberationMode::Vote => self
                .consult_vote_with_progress(question, progress)
                .await
                .map(Into::into),
            DeliberationMode::Synthesize => self
                .consult_synthesize_with_progress(question, progress)
                .await
                .map(Into::into),
            DeliberationMode::Sequential => self
                .sequential_refine_with_progress(question, progress)
                .await
                .map(Into::into),
            DeliberationMode::Summarize => self
                .summarize_with_progress(question, progress)
                .await
                .map(Into::into),
        };

        match &result {
            Ok(outcome) => match serde_json::to_value(outcome) {
                Ok(value) => self
                    .panel
                    .transcript()
                    .log(TranscriptEvent::new("deliberation_result", value)),
                Err(e) => warn!("Could not serialize result for transcript: {}", e),
            },
            Err(e) => self.panel.transcript().log(TranscriptEvent::new(
                "deliberation_error",
                json!({
                    "mode": mode.as_str(),
                    "error": e.to_string(),
                    "timeout": e.is_timeout(),
                }),
            )),
        }

        result
    }
}

fn parse_question(question: &str) -> Result<Question, DeliberationError> {
    Ok(question.parse::<Question>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{MockProvider, as_providers};
    use std::time::Duration;

    fn council(mocks: &[Arc<MockProvider>]) -> Council {
        Council::new(as_providers(mocks), TimeoutPolicy::default()).unwrap()
    }

    fn assert_send_sync_clone<T: Send + Sync + Clone>() {}

    #[test]
    fn test_council_is_shareable() {
        assert_send_sync_clone::<Council>();
    }

    #[test]
    fn test_empty_council_rejected() {
        let result = Council::new(vec![], TimeoutPolicy::default());
        assert!(matches!(result, Err(DeliberationError::NoProviders)));
    }

    #[test]
    fn test_supported_modes() {
        let single = council(&[MockProvider::new("a").shared()]);
        assert!(!single.supported_modes().contains(&DeliberationMode::Sequential));

        let pair = council(&[MockProvider::new("a").shared(), MockProvider::new("b").shared()]);
        assert_eq!(pair.supported_modes().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_question_rejected_without_calls() {
        let mocks = vec![MockProvider::new("a").shared()];
        let result = council(&mocks).deliberate(DeliberationMode::Vote, "   ").await;

        assert!(matches!(result, Err(DeliberationError::InvalidQuestion(_))));
        assert_eq!(mocks[0].call_count(), 0);
    }

    #[tokio::test]
    async fn test_deliberate_dispatches_by_mode() {
        let mocks = vec![
            MockProvider::new("a").with_reply("same words").shared(),
            MockProvider::new("b").with_reply("same words").shared(),
        ];
        let council = council(&mocks);

        for mode in DeliberationMode::all() {
            let result = council.deliberate(mode, "q").await.unwrap();
            assert_eq!(result.mode(), mode);
            assert_eq!(result.question(), "q");
        }
    }

    #[tokio::test]
    async fn test_query_all_covers_every_provider() {
        let mocks = vec![
            MockProvider::new("a").shared(),
            MockProvider::new("b").failing().shared(),
            MockProvider::new("c")
                .with_delay(Duration::from_secs(5))
                .shared(),
        ];
        let council = Council::new(
            as_providers(&mocks),
            TimeoutPolicy::default().with_override("c", Duration::from_millis(50)),
        )
        .unwrap();

        let responses = council.query_all("q").await;
        assert_eq!(responses.len(), 3);
        assert_eq!(responses.success_count(), 1);
        assert!(responses.get("c").is_some_and(|r| r.is_timeout()));
    }

    #[tokio::test]
    async fn test_concurrent_calls_on_clones() {
        let mocks = vec![
            MockProvider::new("a").shared(),
            MockProvider::new("b").shared(),
        ];
        let council = council(&mocks);

        let first = tokio::spawn({
            let council = council.clone();
            async move { council.summarize("one").await }
        });
        let second = tokio::spawn({
            let council = council.clone();
            async move { council.consult_vote("two").await }
        });

        assert!(first.await.unwrap().is_ok());
        assert!(second.await.unwrap().is_ok());
    }
}
