//! CLI entrypoint for snapstudy
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use snapstudy_application::{
    AnalyzeDocumentUseCase, AnswerInput, AnswerUseCase, CompareDocumentsInput,
    CompareDocumentsUseCase, ConversationLogger, NoConversationLogger, NoProgress,
    ProgressNotifier, ProviderAdapter, SummarizeVideoUseCase, VideoInfoSource,
};
use snapstudy_domain::{Question, SourceContext};
use snapstudy_infrastructure::{
    ConfigLoader, ContentLoader, FileConfig, JsonlConversationLogger, OEmbedVideoSource,
    OfflineVideoSource, build_mock_providers, build_providers,
};
use snapstudy_presentation::{
    AnswerView, ChatRepl, Cli, Command, ConsoleFormatter, ConsoleView, OutputFormat,
    ProgressReporter,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Initialize stderr logging, plus a daily log file when `log_dir` is set
fn init_tracing(verbose: u8, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "snapstudy.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

/// Everything a subcommand needs, built once from config
struct App {
    config: FileConfig,
    answer: Arc<AnswerUseCase>,
    format: OutputFormat,
    show_progress: bool,
    mock: bool,
}

impl App {
    fn progress(&self) -> Box<dyn ProgressNotifier> {
        if self.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(NoProgress)
        }
    }

    fn print(&self, view: &dyn ConsoleView) {
        println!("{}", view.render(self.format));
    }

    fn video_use_case(&self) -> Arc<SummarizeVideoUseCase> {
        let source: Arc<dyn VideoInfoSource> = if self.mock {
            Arc::new(OfflineVideoSource)
        } else {
            Arc::new(OEmbedVideoSource::default())
        };
        Arc::new(SummarizeVideoUseCase::new(self.answer.clone(), source))
    }

    fn chat_repl(&self) -> ChatRepl {
        ChatRepl::new(self.answer.clone())
            .with_progress(self.show_progress)
            .with_format(self.format)
            .with_history_window(self.config.orchestration.history_window)
            .with_history_file(self.config.repl.history_file.as_ref().map(PathBuf::from))
    }
}

fn load_source(path: &Path) -> Result<SourceContext> {
    let loaded = ContentLoader::new()
        .load(path)
        .with_context(|| format!("Could not load {}", path.display()))?;
    debug!(
        "{}: {} words, ~{} min read",
        loaded.context.source_name, loaded.stats.word_count, loaded.stats.reading_minutes
    );
    Ok(loaded.context)
}

fn build_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    config
        .logging
        .conversation_log
        .as_deref()
        .and_then(JsonlConversationLogger::open)
        .map(|logger| Arc::new(logger) as Arc<dyn ConversationLogger>)
        .unwrap_or_else(|| Arc::new(NoConversationLogger))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!("Invalid configuration: {e}"))?
    };

    let _log_guard = init_tracing(cli.verbose, config.logging.log_dir.as_deref());
    info!("Starting snapstudy");

    // Validation errors abort; warnings are shown and ignored
    let mut warnings = match config.check() {
        Ok(warnings) => warnings,
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::format_issues(&e.0));
            bail!("Configuration has {} error(s)", e.0.iter().filter(|i| i.is_error()).count());
        }
    };

    // === Dependency Injection ===
    let env = |name: &str| std::env::var(name).ok();
    let providers: Vec<Arc<dyn ProviderAdapter>> = if cli.mock {
        build_mock_providers(&config)
    } else {
        warnings.extend(config.api_key_issues(env));
        build_providers(&config, env)
    };

    ConsoleFormatter::set_color(config.output.color);
    if !cli.quiet && !warnings.is_empty() {
        eprintln!("{}", ConsoleFormatter::format_issues(&warnings));
    }
    if providers.is_empty() {
        bail!("No providers are available. Set an API key (e.g. GROQ_API_KEY_1) or run with --mock.");
    }

    let answer = Arc::new(
        AnswerUseCase::new(providers, config.to_orchestration_config())
            .with_logger(build_logger(&config)),
    );
    let format = cli
        .output
        .or(config.output.format.map(OutputFormat::from))
        .unwrap_or(OutputFormat::Answer);
    let show_progress = !cli.quiet && config.output.show_progress && format != OutputFormat::Json;

    let app = App {
        config,
        answer,
        format,
        show_progress,
        mock: cli.mock,
    };

    match cli.command {
        Some(Command::Ask { question, file }) => {
            let mut input = AnswerInput::new(Question::new(question.as_str())?);
            if let Some(path) = file {
                input = input.with_context(load_source(&path)?);
            }
            let progress = app.progress();
            let output = app.answer.execute_with_progress(input, progress.as_ref()).await?;
            app.print(&AnswerView {
                question: &question,
                output: &output,
            });
        }
        Some(Command::Chat { file }) => {
            let mut repl = app.chat_repl();
            if let Some(path) = file {
                repl = repl.with_context(load_source(&path)?);
            }
            repl.run().await?;
        }
        Some(Command::Analyze { file }) => {
            let document = load_source(&file)?;
            let progress = app.progress();
            let analysis = AnalyzeDocumentUseCase::new(app.answer.clone())
                .execute_with_progress(&document, progress.as_ref())
                .await?;
            app.print(&analysis);
        }
        Some(Command::Compare {
            first,
            second,
            comparison_type,
            prompt,
        }) => {
            let documents = vec![load_source(&first)?, load_source(&second)?];
            let mut input = CompareDocumentsInput::new(documents, comparison_type);
            if let Some(prompt) = prompt {
                input = input.with_custom_prompt(prompt);
            }
            let progress = app.progress();
            let comparison = CompareDocumentsUseCase::new(app.answer.clone())
                .execute_with_progress(input, progress.as_ref())
                .await?;
            app.print(&comparison);
        }
        Some(Command::Video { url, chat }) => {
            let use_case = app.video_use_case();
            let info = use_case.fetch_info(&url).await?;
            let progress = app.progress();
            let summary = use_case
                .summarize_with_progress(&info, progress.as_ref())
                .await?;
            app.print(&summary);

            if chat {
                app.chat_repl().with_video(use_case, summary).run().await?;
            }
        }
        None => app.chat_repl().run().await?,
    }

    Ok(())
}
