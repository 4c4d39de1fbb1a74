//! Output formatter trait

use council_domain::{DeliberationResult, OutputFormat};

/// Trait for formatting deliberation results
pub trait OutputFormatter {
    /// Every stage of the deliberation
    fn format(&self, result: &DeliberationResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &DeliberationResult) -> String;

    /// Only the final answer (concise output)
    fn format_answer_only(&self, result: &DeliberationResult) -> String;

    /// Format in the requested style
    fn render(&self, result: &DeliberationResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(result),
            OutputFormat::Answer => self.format_answer_only(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}
