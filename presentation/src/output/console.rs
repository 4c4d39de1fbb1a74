//! Console output formatter for deliberation results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::{
    DeliberationResult, ProviderReply, RefinementResult, RefinementStage, ResponseSet,
    SummaryResult, SynthesisResult, VoteResult,
};

/// Formats deliberation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result, every stage included
    pub fn format(result: &DeliberationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Council Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            result.question()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Mode:".cyan().bold(),
            result.mode().as_str()
        ));

        match result {
            DeliberationResult::Vote(r) => Self::vote_sections(&mut output, r),
            DeliberationResult::Synthesis(r) => Self::synthesis_sections(&mut output, r),
            DeliberationResult::Refinement(r) => Self::refinement_sections(&mut output, r),
            DeliberationResult::Summary(r) => Self::summary_sections(&mut output, r),
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(result: &DeliberationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the final answer only (concise output)
    pub fn format_answer_only(result: &DeliberationResult) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== LLM Council Answer ===".cyan().bold()
        ));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), result.question()));

        let attribution = match result {
            DeliberationResult::Vote(r) => format!(
                "Selected: {} (confidence {:.2})",
                r.selected_provider,
                r.selected_confidence()
            ),
            DeliberationResult::Synthesis(r) => format!("Synthesized by {}", r.synthesizer),
            DeliberationResult::Refinement(r) => format!(
                "Refined by {}",
                r.chain
                    .iter()
                    .map(|step| step.provider.as_str())
                    .collect::<Vec<_>>()
                    .join(" -> ")
            ),
            DeliberationResult::Summary(r) => format!("Summarized by {}", r.provider),
        };
        output.push_str(&format!("{}\n\n", attribution.dimmed()));

        output.push_str(result.final_answer());
        output.push('\n');

        output
    }

    fn vote_sections(output: &mut String, result: &VoteResult) {
        output.push_str(&Self::section_header("Responses"));
        for (provider, reply) in result.responses.iter() {
            let confidence = result
                .confidence
                .get(provider)
                .map(|c| format!(" (confidence {:.2})", c))
                .unwrap_or_default();
            Self::reply_block(output, &format!("{}{}", provider, confidence), reply);
        }

        output.push_str(&Self::section_header("Selected Answer"));
        output.push_str(&format!(
            "\n{}\n\n{}\n",
            format!(
                "{} (confidence {:.2})",
                result.selected_provider,
                result.selected_confidence()
            )
            .green()
            .bold(),
            result.optimal_answer
        ));
    }

    fn synthesis_sections(output: &mut String, result: &SynthesisResult) {
        output.push_str(&Self::section_header("Phase 1: Independent Responses"));
        Self::response_blocks(output, &result.responses, "");

        if !result.critiques.is_empty() {
            output.push_str(&Self::section_header("Phase 2: Cross-Critiques"));
            Self::response_blocks(output, &result.critiques, " critique");
        }

        output.push_str(&Self::section_header("Phase 3: Final Answer"));
        output.push_str(&format!(
            "\n{}\n\n{}\n",
            format!("Synthesizer: {}", result.synthesizer).yellow().bold(),
            result.final_answer
        ));
    }

    fn refinement_sections(output: &mut String, result: &RefinementResult) {
        if let Some(responses) = &result.independent_responses {
            output.push_str(&Self::section_header("Independent Responses"));
            Self::response_blocks(output, responses, "");
        }

        output.push_str(&Self::section_header("Refinement Chain"));
        for step in &result.chain {
            let title = match step.stage {
                RefinementStage::Initial => format!("── Initial response by {} ──", step.provider),
                RefinementStage::Refinement(k) => {
                    format!("── Refinement {} by {} ──", k, step.provider)
                }
            };
            output.push_str(&format!("\n{}\n", title.yellow().bold()));
            if let Some(analysis) = &step.analysis {
                output.push_str(&format!("{}\n{}\n\n", "Analysis:".cyan(), analysis));
            }
            output.push_str(&format!("{}\n", step.response));
        }

        output.push_str(&Self::section_header("Final Optimized Answer"));
        output.push_str(&format!("\n{}\n", result.final_answer));
    }

    fn summary_sections(output: &mut String, result: &SummaryResult) {
        output.push_str(&Self::section_header("Summary"));
        output.push_str(&format!(
            "\n{}\n\n{}\n",
            format!("Provider: {}", result.provider).yellow().bold(),
            result.summary
        ));
    }

    fn response_blocks(output: &mut String, set: &ResponseSet, suffix: &str) {
        for (provider, reply) in set.iter() {
            Self::reply_block(output, &format!("{}{}", provider, suffix), reply);
        }
    }

    fn reply_block(output: &mut String, title: &str, reply: &ProviderReply) {
        match reply {
            ProviderReply::Answer(text) => output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", title).yellow().bold(),
                text
            )),
            ProviderReply::Failed(failure) => output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", title).red().bold(),
                failure
            )),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &DeliberationResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &DeliberationResult) -> String {
        Self::format_json(result)
    }

    fn format_answer_only(&self, result: &DeliberationResult) -> String {
        Self::format_answer_only(result)
    }
}
