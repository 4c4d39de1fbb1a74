//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::ReplConfig;
use crate::output::formatter::OutputFormatter;
use crate::{ConsoleFormatter, ProgressReporter};
use council_application::{Council, NoProgress, ProgressNotifier};
use council_domain::{ConversationMemory, DeliberationMode, OutputFormat, Role, one_line_preview};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// A parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Quit,
    Help,
    Providers,
    Mode(Option<String>),
    History,
    Clear,
    Unknown(String),
}

impl ReplCommand {
    fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::to_string);
        match name {
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/providers" => ReplCommand::Providers,
            "/mode" => ReplCommand::Mode(arg),
            "/history" => ReplCommand::History,
            "/clear" => ReplCommand::Clear,
            other => ReplCommand::Unknown(other.to_string()),
        }
    }
}

/// Interactive chat REPL
///
/// Each question is sent with the recent conversation prepended, so
/// follow-ups can refer to earlier answers.
pub struct ChatRepl {
    council: Council,
    mode: DeliberationMode,
    format: OutputFormat,
    memory: ConversationMemory,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(council: Council, mode: DeliberationMode, config: ReplConfig) -> Self {
        Self {
            council,
            mode,
            format: OutputFormat::Answer,
            memory: ConversationMemory::new(config.max_history, config.max_tokens),
            config,
        }
    }

    /// Set the output format used for answers
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│           LLM Council - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Providers: {}", self.council.provider_names().join(", "));
        println!("Mode:      {}", self.mode);
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /providers        - Show council members");
        println!("  /mode [name]      - Show or switch the deliberation mode");
        println!("  /history          - Show the remembered conversation");
        println!("  /clear            - Forget the conversation");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, line: &str) -> bool {
        match ReplCommand::parse(line) {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::Providers => {
                println!();
                println!("Council members:");
                for name in self.council.provider_names() {
                    println!("  - {}", name);
                }
                println!();
            }
            ReplCommand::Mode(None) => {
                println!("Current mode: {}", self.mode);
                for mode in self.council.supported_modes() {
                    println!("  {}", mode.description());
                }
            }
            ReplCommand::Mode(Some(name)) => match name.parse::<DeliberationMode>() {
                Ok(mode) if self.council.supported_modes().contains(&mode) => {
                    self.mode = mode;
                    println!("Mode set to {}", mode);
                }
                Ok(mode) => println!(
                    "{} mode needs at least {} providers",
                    mode,
                    mode.min_providers()
                ),
                Err(e) => println!("{}", e),
            },
            ReplCommand::History => {
                if self.memory.is_empty() {
                    println!("(no conversation yet)");
                }
                for message in self.memory.messages() {
                    println!("{}: {}", message.role.title(), one_line_preview(&message.content, 120));
                }
            }
            ReplCommand::Clear => {
                self.memory.clear();
                println!("Conversation cleared");
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn process_question(&mut self, question: &str) {
        println!();

        let prompt = self.memory.build_prompt_with_context(question);
        let reporter = ProgressReporter::new();
        let progress: &dyn ProgressNotifier = if self.config.show_progress {
            &reporter
        } else {
            &NoProgress
        };

        match self
            .council
            .deliberate_with_progress(self.mode, &prompt, progress)
            .await
        {
            Ok(result) => {
                self.memory.add_message(Role::User, question);
                self.memory.add_message(Role::Assistant, result.final_answer());
                println!("{}", ConsoleFormatter.render(&result, self.format));
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/q"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/mode"), ReplCommand::Mode(None));
        assert_eq!(
            ReplCommand::parse("/mode   vote"),
            ReplCommand::Mode(Some("vote".to_string()))
        );
        assert_eq!(ReplCommand::parse("/clear"), ReplCommand::Clear);
        assert_eq!(
            ReplCommand::parse("/nope"),
            ReplCommand::Unknown("/nope".to_string())
        );
    }
}
