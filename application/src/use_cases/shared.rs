//! Shared helpers for use cases.
//!
//! Contains the bounded provider call and the concurrent fan-out used by
//! every stage that talks to more than one provider.

use crate::ports::llm_provider::LlmProvider;
use crate::ports::progress::ProgressNotifier;
use crate::use_cases::error::ProviderFailure;
use crate::use_cases::panel::ProviderPanel;
use council_domain::{Phase, ProviderReply, ResponseSet};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of one provider call, keyed by provider name
pub(crate) type CallOutcome = (String, Result<String, ProviderFailure>);

/// Query a provider, giving up after `timeout`.
///
/// Timeouts and provider errors come back as [`ProviderFailure`], never as
/// a panic or an aborted task.
pub(crate) async fn query_bounded(
    provider: &dyn LlmProvider,
    prompt: &str,
    timeout: Duration,
) -> Result<String, ProviderFailure> {
    match tokio::time::timeout(timeout, provider.query(prompt, None)).await {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ProviderFailure::Upstream(e)),
        Err(_) => Err(ProviderFailure::Timeout { after: timeout }),
    }
}

/// Run one call per `(provider, prompt)` task concurrently.
///
/// Outcomes come back in task order, one per task, whatever happened to
/// the others.
pub(crate) async fn fan_out(
    panel: &ProviderPanel,
    phase: Phase,
    tasks: &[(Arc<dyn LlmProvider>, String)],
    progress: &dyn ProgressNotifier,
) -> Vec<CallOutcome> {
    progress.on_phase_start(&phase, tasks.len());

    let calls = tasks.iter().map(|(provider, prompt)| async move {
        let result = panel.call(provider.as_ref(), phase, prompt).await;
        progress.on_task_complete(&phase, provider.name(), result.is_ok());
        (provider.name().to_string(), result)
    });
    let outcomes = join_all(calls).await;

    progress.on_phase_complete(&phase);
    outcomes
}

/// Fold call outcomes into a result map, failures as in-band markers
pub(crate) fn to_response_set(outcomes: &[CallOutcome]) -> ResponseSet {
    outcomes
        .iter()
        .map(|(name, result)| {
            let reply = match result {
                Ok(text) => ProviderReply::answer(text.clone()),
                Err(e) => ProviderReply::failed(e.to_reply_failure()),
            };
            (name.clone(), reply)
        })
        .collect()
}
