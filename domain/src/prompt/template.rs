//! Prompt templates for the council flow

use crate::refinement::parsing::{ANALYSIS_MARKER, IMPROVED_MARKER, OPTIMIZED_MARKER};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt for the independent answers of the fan-out and baseline stages
    pub fn concise_answer(question: &str) -> String {
        format!(
            r#"Provide a crisp, to-the-point answer. Be concise and direct - no fluff, just the essential information.

Question: {}

Answer:"#,
            question
        )
    }

    /// Prompt asking one provider to critique the other providers' answers
    pub fn critique_prompt(question: &str, others: &[(&str, &str)]) -> String {
        let mut prompt = format!(
            r#"Review these answers for conciseness and accuracy.

Question: {}

Other answers:
"#,
            question
        );

        for (provider, content) in others {
            prompt.push_str(&format!("\n--- {} ---\n{}\n", provider, content));
        }

        prompt.push_str(
            r#"
Critique:
1. What's correct but too verbose?
2. What's missing or wrong?
3. How to make them more crisp and to-the-point?

Be brief in your critique."#,
        );

        prompt
    }

    /// Prompt for merging all answers and critiques into one final answer
    pub fn synthesis_prompt(
        question: &str,
        responses: &[(&str, &str)],
        critiques: &[(&str, &str)],
    ) -> String {
        let mut prompt = format!(
            r#"You are an expert summarizer. Provide a crisp, to-the-point answer.

Question: {}

Candidate answers:
"#,
            question
        );

        for (provider, content) in responses {
            prompt.push_str(&format!("\n--- {} ---\n{}\n", provider, content));
        }

        if !critiques.is_empty() {
            prompt.push_str("\nReview notes:\n");

            for (provider, critique) in critiques {
                prompt.push_str(&format!("\n--- Notes by {} ---\n{}\n", provider, critique));
            }
        }

        prompt.push_str(
            r#"
Task: Create ONE concise, direct answer that:
- Captures the essential information
- Removes redundancy and fluff
- Is crisp and to-the-point
- Corrects any errors

Answer the question directly. Do not mention models, answers, reviews, critiques or how this answer was produced.
Be ruthless - keep it short and direct. No unnecessary words."#,
        );

        prompt
    }

    /// Prompt for one refiner in the sequential chain
    pub fn refine_prompt(question: &str, previous: &str) -> String {
        format!(
            r#"Make this response more crisp and to-the-point. Remove unnecessary words, keep only essential information.

Question: {question}

Previous Response: {previous}

Task:
1. Identify what is missing, wrong, or can be removed or condensed (be ruthless - cut fluff)
2. Provide a more concise, direct version

Format:
{ANALYSIS_MARKER}
[What to add, fix, remove or condense]

{IMPROVED_MARKER}
[Crisp, to-the-point version - shorter than previous]"#
        )
    }

    /// Prompt for the refiner of a two-provider council, which sees both
    /// independent baselines
    pub fn combine_prompt(question: &str, current: &str, other_baseline: Option<&str>) -> String {
        let mut prompt = format!(
            r#"Combine and optimize the following answers into the best possible response.

Question: {}

Response 1:
{}
"#,
            question, current
        );

        if let Some(other) = other_baseline {
            prompt.push_str(&format!("\nResponse 2:\n{}\n", other));
        }

        prompt.push_str(&format!(
            r#"
Task:
1. Identify gaps, errors and redundancy
2. Produce one optimized, concise answer

Format:
{ANALYSIS_MARKER}
[Gaps, errors and redundancy found]

{OPTIMIZED_MARKER}
[The optimized answer]"#
        ));

        prompt
    }

    /// Prompt for the summarizer
    pub fn summarize_prompt(question: &str) -> String {
        format!(
            r#"Answer the following as 2-5 short bullet points. One line per bullet, no introduction, no conclusion.

Question: {}

Bullets:"#,
            question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concise_answer_format() {
        let question = "What is Rust?";
        let prompt = PromptTemplate::concise_answer(question);
        assert!(prompt.contains(question));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn test_critique_prompt_lists_others() {
        let others = vec![
            ("Groq", "Rust is a systems programming language."),
            ("Mistral", "Rust focuses on safety and performance."),
        ];
        let prompt = PromptTemplate::critique_prompt("What is Rust?", &others);
        assert!(prompt.contains("--- Groq ---"));
        assert!(prompt.contains("--- Mistral ---"));
        assert!(prompt.contains("systems programming"));
    }

    #[test]
    fn test_synthesis_prompt_format() {
        let responses = vec![("Groq", "Rust is a systems language.")];
        let critiques = vec![("Mistral", "Accurate but terse.")];
        let prompt = PromptTemplate::synthesis_prompt("What is Rust?", &responses, &critiques);
        assert!(prompt.contains("Groq"));
        assert!(prompt.contains("Notes by Mistral"));
        assert!(prompt.contains("Do not mention models"));
    }

    #[test]
    fn test_synthesis_without_critiques() {
        let responses = vec![("Groq", "Rust is a systems language.")];
        let prompt = PromptTemplate::synthesis_prompt("What is Rust?", &responses, &[]);
        assert!(!prompt.contains("Review notes:"));
    }

    #[test]
    fn test_refine_prompt_requests_both_sections() {
        let prompt = PromptTemplate::refine_prompt("q", "previous answer");
        assert!(prompt.contains("ANALYSIS:"));
        assert!(prompt.contains("IMPROVED RESPONSE:"));
        assert!(prompt.contains("previous answer"));
    }

    #[test]
    fn test_combine_prompt_optional_second_baseline() {
        let with = PromptTemplate::combine_prompt("q", "first", Some("second"));
        assert!(with.contains("Response 2:\nsecond"));
        assert!(with.contains("OPTIMIZED RESPONSE:"));

        let without = PromptTemplate::combine_prompt("q", "first", None);
        assert!(!without.contains("Response 2:"));
    }

    #[test]
    fn test_summarize_prompt_asks_for_bullets() {
        let prompt = PromptTemplate::summarize_prompt("Explain TCP");
        assert!(prompt.contains("2-5 short bullet points"));
        assert!(prompt.contains("Explain TCP"));
    }
}
