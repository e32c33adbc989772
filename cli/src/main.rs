//! CLI entrypoint for lingua-qa
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use lingua_application::{
    AnswerQuestionUseCase, ConversationLogger, NoProgress, PipelineProgress, QaSession,
};
use lingua_domain::{LanguageCode, OutputFormat};
use lingua_infrastructure::{ConfigLoader, FileConfig, JsonlConversationLogger, PipelineServices};
use lingua_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, ProgressReporter, ReplConfig,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Initialize logging based on verbosity level.
///
/// `RUST_LOG` wins over `-v` when set. With a log file configured, records
/// go to stderr and the file; the returned guard flushes the file on drop.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_writer = log_file.and_then(|path| {
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty())?;
        let name = path.file_name()?;
        std::fs::create_dir_all(dir).ok()?;
        Some(tracing_appender::non_blocking(
            tracing_appender::rolling::never(dir, name),
        ))
    });

    match file_writer {
        Some((writer, guard)) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::io::stderr.and(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!("{}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let current_language = cli
        .lang
        .as_deref()
        .map(LanguageCode::resolve)
        .transpose()
        .context("Invalid --lang")?;

    if cli.list_languages {
        print!(
            "{}",
            ConsoleFormatter::format_languages(current_language.as_ref())
        );
        return Ok(());
    }

    let config = load_config(&cli)?;
    let _log_guard = init_tracing(cli.verbose, config.logging.file_path().as_deref());

    info!("Starting lingua-qa");

    // Validate configuration
    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("config error: {}", issue);
        } else {
            warn!("{}", issue);
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration");
    }

    colored::control::set_override(config.output.color);

    // === Dependency Injection ===
    let services = PipelineServices::from_config(&config)?;

    let (mut params, _) = config.pipeline.to_pipeline_params();
    if let Some(secs) = cli.timeout {
        params = params.with_request_timeout((secs > 0).then(|| Duration::from_secs(secs)));
    }

    let mut use_case = AnswerQuestionUseCase::new(
        services.detector,
        services.translation,
        services.knowledge,
        services.model,
    )
    .with_params(params);

    if let Some(path) = config.logging.conversation_log_path()
        && let Some(logger) = JsonlConversationLogger::open(&path)
    {
        info!("Transcript: {}", logger.path().display());
        use_case = use_case.with_conversation_logger(Arc::new(logger) as Arc<dyn ConversationLogger>);
    }

    let mut session = QaSession::new(Arc::new(use_case));
    if let Some(language) = current_language {
        session = session.with_output_language(language);
    }

    let output = OutputConfig {
        format: cli
            .output
            .map(OutputFormat::from)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color,
    };

    // Chat mode
    if cli.chat {
        let repl = ReplConfig {
            show_progress: config.repl.show_progress && !cli.quiet,
            history_file: config.repl.history_path(),
        };
        let mut chat = ChatRepl::new(session)
            .with_output(output)
            .with_repl_config(repl);

        chat.run().await;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let progress: Box<dyn PipelineProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    match session
        .ask_with(&question, progress.as_ref(), Some(token))
        .await
    {
        Ok(reply) => {
            println!("{}", ConsoleFormatter::format(&reply, output.format));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::format_error(&e, output.format));
            std::process::exit(1);
        }
    }
}
