//! CLI entrypoint for LLM Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use council_application::{Council, NoProgress, ProgressNotifier, ResponseCache};
use council_domain::OutputFormat;
use council_infrastructure::{
    ConfigLoader, FifoResponseCache, FileConfig, JsonlTranscriptLogger, build_providers,
};
use council_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, ReplConfig,
    SimpleProgress,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_ref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    check_config(&config)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting LLM Council");

    // === Dependency Injection ===
    let cache: Option<Arc<dyn ResponseCache>> = (config.cache.enabled && !cli.no_cache)
        .then(|| Arc::new(FifoResponseCache::new(config.cache.capacity)) as Arc<dyn ResponseCache>);

    let providers = build_providers(&config.providers, cache);
    if providers.is_empty() {
        bail!(
            "No providers available. Set GROQ_API_KEY or MISTRAL_API_KEY, or USE_OLLAMA=true for a local Ollama."
        );
    }

    let (timeouts, _) = config.timeouts.to_policy();
    let mut council = Council::new(providers, timeouts)?;

    if let Some(path) = &cli.transcript {
        let logger = JsonlTranscriptLogger::open(path)
            .with_context(|| format!("Failed to open transcript {}", path.display()))?;
        council = council.with_transcript(Arc::new(logger));
    }

    let (configured_mode, _) = config.council.parse_mode();
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    // Chat mode
    if cli.chat {
        let repl_config = ReplConfig {
            show_progress: config.repl.show_progress,
            history_file: config.repl.history_file.clone(),
            max_history: config.memory.max_history,
            max_tokens: config.memory.max_tokens,
        };
        let mut repl = ChatRepl::new(council, configured_mode, repl_config)
            .with_format(format)
            .with_progress(!cli.quiet && config.repl.show_progress);

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let (question, cli_mode) = cli.question_and_mode();
    if question.trim().is_empty() {
        bail!("Question is required. Use --chat for interactive mode.");
    }
    let mode = cli_mode.unwrap_or(configured_mode);

    if !cli.quiet && !format.is_machine_readable() {
        eprintln!();
        eprintln!("{}", "LLM Council".cyan().bold());
        eprintln!("Providers: {}", council.provider_names().join(", "));
        eprintln!("Mode:      {}", mode.description());
        eprintln!();
    }

    let reporter = ProgressReporter::new();
    let progress: &dyn ProgressNotifier = if cli.quiet {
        &NoProgress
    } else if std::io::stderr().is_terminal() {
        &reporter
    } else {
        &SimpleProgress
    };

    let result = council
        .deliberate_with_progress(mode, &question, progress)
        .await?;

    println!("{}", ConsoleFormatter.render(&result, format));

    Ok(())
}

/// Initialize logging based on verbosity; `RUST_LOG` takes precedence
fn init_logging(verbose: u8, log_file: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

/// Print configuration warnings; fail on errors
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    let mut errors = Vec::new();

    for issue in &issues {
        if issue.is_error() {
            errors.push(issue.message.clone());
        } else {
            warn!("{}", issue.message);
            eprintln!("{} {}", "Warning:".yellow().bold(), issue.message);
        }
    }

    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }
    Ok(())
}
