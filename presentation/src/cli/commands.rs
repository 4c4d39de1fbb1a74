//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::DeliberationMode;
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with every stage
    Full,
    /// Only the final answer
    Answer,
    /// JSON output
    Json,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => council_domain::OutputFormat::Full,
            OutputFormat::Answer => council_domain::OutputFormat::Answer,
            OutputFormat::Json => council_domain::OutputFormat::Json,
        }
    }
}

/// Deliberation mode as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Most agreed-upon answer wins
    Vote,
    /// Answers, cross-critique, one merged answer
    Synthesize,
    /// A baseline refined by each provider in turn
    Sequential,
    /// Short bullet-point summary
    Summarize,
}

impl From<ModeArg> for DeliberationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Vote => DeliberationMode::Vote,
            ModeArg::Synthesize => DeliberationMode::Synthesize,
            ModeArg::Sequential => DeliberationMode::Sequential,
            ModeArg::Summarize => DeliberationMode::Summarize,
        }
    }
}

/// Trailing words that select a mode when `--mode` is absent
const MODE_WORDS: [(&str, DeliberationMode); 2] = [
    ("sequential", DeliberationMode::Sequential),
    ("summarize", DeliberationMode::Summarize),
];

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - Several LLMs answer, one answer comes back")]
#[command(long_about = r#"
LLM Council asks several language models the same question and combines
their answers.

Modes:
  vote        Every provider answers; the most agreed-upon answer wins
  synthesize  Every provider answers and critiques the others; one merges (default)
  sequential  The first provider answers; each following one refines
  summarize   One provider, a few short bullet points

Providers come from the environment: Groq (GROQ_API_KEY), Mistral
(MISTRAL_API_KEY), and Ollama when USE_OLLAMA is set.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/llm-council/config.toml   Global config

Example:
  llm-council "What's the best way to handle errors in Rust?"
  llm-council --mode vote "Is a hot dog a sandwich?"
  llm-council "Explain ownership in Rust" sequential
  llm-council --chat
"#)]
pub struct Cli {
    /// The question to ask the council (not required in chat mode).
    /// A trailing `sequential` or `summarize` word selects that mode.
    #[arg(value_name = "QUESTION", trailing_var_arg = true)]
    pub question: Vec<String>,

    /// Deliberation mode (defaults to the configured mode)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Output format (defaults to the configured format, then `answer`)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Do not cache provider responses
    #[arg(long)]
    pub no_cache: bool,

    /// Append every provider call and result to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The question text and the mode picked on the command line, if any.
    ///
    /// Without `--mode`, a trailing `sequential` or `summarize` word after at
    /// least one other word selects that mode and is removed from the
    /// question.
    pub fn question_and_mode(&self) -> (String, Option<DeliberationMode>) {
        if let Some(mode) = self.mode {
            return (self.question.join(" "), Some(mode.into()));
        }

        if let [words @ .., last] = self.question.as_slice()
            && !words.is_empty()
            && let Some((_, mode)) = MODE_WORDS.iter().find(|(word, _)| *word == last.as_str())
        {
            return (words.join(" "), Some(*mode));
        }

        (self.question.join(" "), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("llm-council").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_question_words_are_joined() {
        let cli = parse(&["What", "is", "Rust?"]);
        assert_eq!(cli.question_and_mode(), ("What is Rust?".to_string(), None));
    }

    #[test]
    fn test_trailing_mode_word() {
        let cli = parse(&["Explain ownership", "sequential"]);
        assert_eq!(
            cli.question_and_mode(),
            (
                "Explain ownership".to_string(),
                Some(DeliberationMode::Sequential)
            )
        );

        let cli = parse(&["Explain", "ownership", "summarize"]);
        assert_eq!(cli.question_and_mode().1, Some(DeliberationMode::Summarize));
    }

    #[test]
    fn test_lone_mode_word_is_the_question() {
        let cli = parse(&["summarize"]);
        assert_eq!(cli.question_and_mode(), ("summarize".to_string(), None));
    }

    #[test]
    fn test_explicit_mode_keeps_every_word() {
        let cli = parse(&["--mode", "vote", "why", "sequential"]);
        assert_eq!(
            cli.question_and_mode(),
            ("why sequential".to_string(), Some(DeliberationMode::Vote))
        );
    }

    #[test]
    fn test_flags() {
        let cli = parse(&[
            "-vv",
            "--no-cache",
            "--output",
            "json",
            "--transcript",
            "t.jsonl",
            "q",
        ]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_cache);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.transcript, Some(PathBuf::from("t.jsonl")));
    }

    #[test]
    fn test_chat_needs_no_question() {
        let cli = parse(&["--chat"]);
        assert!(cli.chat);
        assert!(cli.question.is_empty());
    }
}
