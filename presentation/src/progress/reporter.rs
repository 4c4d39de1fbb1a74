//! Progress display while the council deliberates
//!
//! Everything here writes to stderr so that stdout only carries the answer.

use colored::Colorize;
use council_application::ProgressNotifier;
use council_domain::Phase;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Label shown next to a phase's bar or heading
fn phase_label(phase: &Phase) -> &'static str {
    match phase {
        Phase::Initial => "Independent responses",
        Phase::Critique => "Cross-critique",
        Phase::Synthesis => "Synthesis",
        Phase::Refinement => "Refinement",
        Phase::Summary => "Summary",
    }
}

fn outcome_mark(success: bool) -> colored::ColoredString {
    if success { "v".green() } else { "x".red() }
}

/// Animated bars, one per phase, drawn with indicatif
pub struct ProgressReporter {
    multi: MultiProgress,
    current: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::stderr()),
            current: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{spinner:.green} {prefix:<22.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {elapsed:>4} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let bar = self.multi.add(ProgressBar::new(total_tasks as u64));
        bar.set_style(Self::style());
        bar.set_prefix(phase_label(phase));
        bar.set_message("waiting for providers");
        bar.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut current) = self.current.lock() {
            // A phase that never reported completion still gets its bar closed
            if let Some(stale) = current.replace(bar) {
                stale.abandon();
            }
        }
    }

    fn on_task_complete(&self, _phase: &Phase, provider: &str, success: bool) {
        if let Ok(current) = self.current.lock()
            && let Some(bar) = current.as_ref()
        {
            bar.set_message(format!("{} {}", outcome_mark(success), provider));
            bar.inc(1);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        if let Ok(mut current) = self.current.lock()
            && let Some(bar) = current.take()
        {
            bar.finish_with_message("done".green().to_string());
        }
    }
}

/// Plain line-per-event progress for when stderr is not a terminal
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} calls)",
            "->".cyan(),
            phase_label(phase).bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: &Phase, provider: &str, success: bool) {
        let note = if success { "" } else { " (failed)" };
        eprintln!("   {} {}{}", outcome_mark(success), provider, note);
    }

    fn on_phase_complete(&self, _phase: &Phase) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_phase_has_a_label() {
        for phase in [
            Phase::Initial,
            Phase::Critique,
            Phase::Synthesis,
            Phase::Refinement,
            Phase::Summary,
        ] {
            assert!(!phase_label(&phase).is_empty());
        }
    }

    #[test]
    fn test_reporter_survives_out_of_order_events() {
        let reporter = ProgressReporter {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            current: Mutex::new(None),
        };

        reporter.on_task_complete(&Phase::Initial, "Groq", true);
        reporter.on_phase_complete(&Phase::Initial);

        reporter.on_phase_start(&Phase::Initial, 2);
        reporter.on_phase_start(&Phase::Critique, 2);
        reporter.on_task_complete(&Phase::Critique, "Groq", false);
        reporter.on_phase_complete(&Phase::Critique);

        assert!(reporter.current.lock().unwrap().is_none());
    }
}
