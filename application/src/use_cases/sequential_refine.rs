//! Sequential refinement use case
//!
//! The first provider answers, then each following provider in
//! registration order reviews the running answer and rewrites it.
//!
//! A council of exactly two providers runs a specialized flow: both answer
//! independently first, and the second provider combines its own baseline
//! with the first one's answer.

use crate::ports::llm_provider::LlmProvider;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::error::{DeliberationError, ProviderFailure};
use crate::use_cases::panel::ProviderPanel;
use crate::use_cases::shared::{fan_out, to_response_set};
use council_domain::{
    DeliberationMode, Phase, PromptTemplate, Question, RefinementResult, RefinementStage,
    RefinementStep, ResponseSet, parse_refinement_output,
};
use tracing::{debug, info};

/// Starting point of a chain: the lead's answer, plus the second
/// provider's baseline and both raw baselines in a two-provider council
struct ChainStart {
    initial: String,
    other_baseline: Option<String>,
    independent_responses: Option<ResponseSet>,
}

/// Use case for sequential refinement mode
pub struct SequentialRefineUseCase {
    panel: ProviderPanel,
}

impl SequentialRefineUseCase {
    pub fn new(panel: ProviderPanel) -> Self {
        Self { panel }
    }

    pub async fn execute(&self, question: &Question) -> Result<RefinementResult, DeliberationError> {
        self.execute_with_progress(question, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        question: &Question,
        progress: &dyn ProgressNotifier,
    ) -> Result<RefinementResult, DeliberationError> {
        let required = DeliberationMode::Sequential.min_providers();
        if self.panel.len() < required {
            return Err(DeliberationError::NotEnoughProviders {
                mode: DeliberationMode::Sequential,
                required,
                available: self.panel.len(),
            });
        }

        info!(
            "Starting sequential refinement across {} providers",
            self.panel.len()
        );

        let baseline_prompt = PromptTemplate::concise_answer(question.as_str());
        let start = if self.panel.len() == 2 {
            self.gather_baselines(&baseline_prompt, progress).await?
        } else {
            self.initial_answer(&baseline_prompt, progress).await?
        };
        let combine = start.independent_responses.is_some();

        let lead = self.panel.lead();
        let mut chain = vec![RefinementStep::initial(lead.name(), start.initial.clone())];
        let mut current = start.initial;

        let refiners = &self.panel.providers()[1..];
        progress.on_phase_start(&Phase::Refinement, refiners.len());

        for (index, refiner) in refiners.iter().enumerate() {
            let k = index + 1;
            let prompt = if combine {
                PromptTemplate::combine_prompt(
                    question.as_str(),
                    &current,
                    start.other_baseline.as_deref(),
                )
            } else {
                PromptTemplate::refine_prompt(question.as_str(), &current)
            };

            let result = self
                .panel
                .call(refiner.as_ref(), Phase::Refinement, &prompt)
                .await;
            progress.on_task_complete(&Phase::Refinement, refiner.name(), result.is_ok());
            let raw = result.map_err(|source| {
                step_failed(RefinementStage::Refinement(k), refiner.as_ref(), source)
            })?;

            let parsed = parse_refinement_output(&raw);
            if parsed.used_fallback {
                debug!(
                    "{} omitted the section markers, keeping its whole output",
                    refiner.name()
                );
            }

            info!("Refinement {} by {} complete", k, refiner.name());
            chain.push(RefinementStep::refinement(
                k,
                refiner.name(),
                parsed.response.clone(),
                parsed.analysis,
            ));
            current = parsed.response;
        }

        progress.on_phase_complete(&Phase::Refinement);

        Ok(RefinementResult {
            question: question.as_str().to_string(),
            chain,
            independent_responses: start.independent_responses,
            final_answer: current,
        })
    }

    /// Chain head for councils of three or more
    async fn initial_answer(
        &self,
        prompt: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<ChainStart, DeliberationError> {
        let lead = self.panel.lead();
        progress.on_phase_start(&Phase::Initial, 1);
        let result = self.panel.call(lead.as_ref(), Phase::Initial, prompt).await;
        progress.on_task_complete(&Phase::Initial, lead.name(), result.is_ok());
        progress.on_phase_complete(&Phase::Initial);

        let initial =
            result.map_err(|source| step_failed(RefinementStage::Initial, lead.as_ref(), source))?;
        Ok(ChainStart {
            initial,
            other_baseline: None,
            independent_responses: None,
        })
    }

    /// Both providers of a two-provider council answer concurrently.
    ///
    /// The lead's baseline starts the chain, so its failure is fatal. A
    /// failed second baseline is only left out of the combine prompt.
    async fn gather_baselines(
        &self,
        prompt: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<ChainStart, DeliberationError> {
        let tasks: Vec<_> = self
            .panel
            .providers()
            .iter()
            .map(|p| (p.clone(), prompt.to_string()))
            .collect();
        let outcomes = fan_out(&self.panel, Phase::Initial, &tasks, progress).await;
        let independent = to_response_set(&outcomes);

        let mut outcomes = outcomes.into_iter();
        let initial = match outcomes.next() {
            Some((_, Ok(text))) => text,
            Some((_, Err(source))) => {
                return Err(step_failed(
                    RefinementStage::Initial,
                    self.panel.lead().as_ref(),
                    source,
                ));
            }
            None => return Err(DeliberationError::NoProviders),
        };
        let other_baseline = outcomes.next().and_then(|(name, result)| match result {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("Baseline from {} unavailable: {}", name, e);
                None
            }
        });

        Ok(ChainStart {
            initial,
            other_baseline,
            independent_responses: Some(independent),
        })
    }
}

fn step_failed(
    stage: RefinementStage,
    provider: &dyn LlmProvider,
    source: ProviderFailure,
) -> DeliberationError {
    DeliberationError::RefinementStepFailed {
        stage,
        provider: provider.name().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeoutPolicy;
    use crate::ports::llm_provider::ProviderError;
    use crate::use_cases::testing::{MockProvider, as_providers};
    use council_domain::FALLBACK_ANALYSIS;
    use std::sync::Arc;
    use std::time::Duration;

    fn use_case(mocks: &[Arc<MockProvider>]) -> SequentialRefineUseCase {
        use_case_with(mocks, TimeoutPolicy::default())
    }

    fn use_case_with(mocks: &[Arc<MockProvider>], timeouts: TimeoutPolicy) -> SequentialRefineUseCase {
        SequentialRefineUseCase::new(ProviderPanel::new(as_providers(mocks), timeouts).unwrap())
    }

    #[tokio::test]
    async fn test_single_provider_fails_without_calls() {
        let mocks = vec![MockProvider::new("solo").shared()];
        let result = use_case(&mocks).execute(&Question::parse("q").unwrap()).await;

        match result {
            Err(DeliberationError::NotEnoughProviders {
                required,
                available,
                ..
            }) => {
                assert_eq!(required, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected NotEnoughProviders, got {:?}", other),
        }
        assert_eq!(mocks[0].call_count(), 0);
    }

    #[tokio::test]
    async fn test_two_provider_scenario() {
        let mocks = vec![
            MockProvider::new("A").with_reply("X").shared(),
            MockProvider::new("B")
                .with_reply("ANALYSIS:\nmissing Y\nOPTIMIZED RESPONSE:\nX and Y")
                .shared(),
        ];
        let result = use_case(&mocks).execute(&Question::parse("q").unwrap()).await.unwrap();

        assert_eq!(result.final_answer, "X and Y");
        assert_eq!(result.analysis(), Some("missing Y"));

        assert_eq!(result.chain.len(), 2);
        assert_eq!(result.chain[0].stage, RefinementStage::Initial);
        assert_eq!(result.chain[0].provider, "A");
        assert_eq!(result.chain[0].response, "X");
        assert_eq!(result.chain[0].analysis, None);
        assert_eq!(result.chain[1].stage, RefinementStage::Refinement(1));
        assert_eq!(result.chain[1].provider, "B");

        let independent = result.independent_responses.unwrap();
        assert_eq!(independent.get("A").and_then(|r| r.text()), Some("X"));
        assert_eq!(
            independent.get("B").and_then(|r| r.text()),
            Some("ANALYSIS:\nmissing Y\nOPTIMIZED RESPONSE:\nX and Y")
        );

        // B saw both baselines when combining
        let combine_prompt = mocks[1].prompts().last().cloned().unwrap();
        assert!(combine_prompt.contains("Response 1:\nX"));
        assert!(combine_prompt.contains("Response 2:"));
    }

    #[tokio::test]
    async fn test_chain_over_three_providers() {
        let mocks = vec![
            MockProvider::new("a").with_reply("draft").shared(),
            MockProvider::new("b")
                .with_reply("ANALYSIS: too long\nIMPROVED RESPONSE: shorter")
                .shared(),
            MockProvider::new("c").with_reply("no markers here").shared(),
        ];
        let result = use_case(&mocks).execute(&Question::parse("q").unwrap()).await.unwrap();

        assert_eq!(result.chain.len(), 3);
        assert!(result.independent_responses.is_none());
        assert_eq!(result.chain[1].response, "shorter");
        assert_eq!(result.chain[1].analysis.as_deref(), Some("too long"));
        assert_eq!(result.chain[2].stage, RefinementStage::Refinement(2));
        assert_eq!(result.chain[2].analysis.as_deref(), Some(FALLBACK_ANALYSIS));
        assert_eq!(result.final_answer, "no markers here");

        // each refiner sees the running answer, not the original draft
        assert!(mocks[2].prompts()[0].contains("shorter"));
        assert_eq!(mocks[0].call_count(), 1);
        assert_eq!(mocks[1].call_count(), 1);
        assert_eq!(mocks[2].call_count(), 1);
    }

    #[tokio::test]
    async fn test_step_failure_is_fatal() {
        let mocks = vec![
            MockProvider::new("a").shared(),
            MockProvider::new("b").failing().shared(),
            MockProvider::new("c").shared(),
        ];
        let result = use_case(&mocks).execute(&Question::parse("q").unwrap()).await;

        match result {
            Err(DeliberationError::RefinementStepFailed { stage, provider, .. }) => {
                assert_eq!(stage, RefinementStage::Refinement(1));
                assert_eq!(provider, "b");
            }
            other => panic!("expected RefinementStepFailed, got {:?}", other),
        }
        assert_eq!(mocks[2].call_count(), 0);
    }

    #[tokio::test]
    async fn test_initial_timeout_is_fatal() {
        let mocks = vec![
            MockProvider::new("slow")
                .with_delay(Duration::from_secs(5))
                .shared(),
            MockProvider::new("b").shared(),
            MockProvider::new("c").shared(),
        ];
        let result = use_case_with(&mocks, TimeoutPolicy::uniform(Duration::from_millis(50)))
            .execute(&Question::parse("q").unwrap())
            .await;

        let err = result.unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(err.failed_provider(), Some("slow"));
    }

    #[tokio::test]
    async fn test_two_providers_lead_baseline_failure_is_fatal() {
        let mocks = vec![
            MockProvider::new("a").failing().shared(),
            MockProvider::new("b").shared(),
        ];
        let result = use_case(&mocks).execute(&Question::parse("q").unwrap()).await;

        match result {
            Err(DeliberationError::RefinementStepFailed { stage, provider, .. }) => {
                assert_eq!(stage, RefinementStage::Initial);
                assert_eq!(provider, "a");
            }
            other => panic!("expected RefinementStepFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_two_providers_second_baseline_failure_is_omitted() {
        let mocks = vec![
            MockProvider::new("a").with_reply("X").shared(),
            MockProvider::new("b")
                .with_replies(vec![Err(ProviderError::Timeout)])
                .with_reply("ANALYSIS: fine\nOPTIMIZED RESPONSE: X!")
                .shared(),
        ];
        let result = use_case(&mocks).execute(&Question::parse("q").unwrap()).await.unwrap();

        assert_eq!(result.final_answer, "X!");
        let independent = result.independent_responses.unwrap();
        assert!(!independent.get("b").unwrap().is_success());

        let combine_prompt = mocks[1].prompts().last().cloned().unwrap();
        assert!(!combine_prompt.contains("Response 2:"));
    }
}
