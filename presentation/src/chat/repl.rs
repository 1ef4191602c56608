//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::cli::commands::OutputFormat;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use snapstudy_application::{
    AnswerError, AnswerInput, AnswerUseCase, NoProgress, ProgressNotifier, SummarizeVideoUseCase,
};
use snapstudy_domain::{Answer, History, Question, SourceContext, VideoSummary};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_HISTORY_WINDOW: usize = 10;

/// What the conversation is about
enum ChatSubject {
    General,
    Source(SourceContext),
    Video {
        use_case: Arc<SummarizeVideoUseCase>,
        summary: VideoSummary,
    },
}

/// Interactive chat REPL
pub struct ChatRepl {
    answer: Arc<AnswerUseCase>,
    subject: ChatSubject,
    show_progress: bool,
    format: OutputFormat,
    history_window: usize,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    pub fn new(answer: Arc<AnswerUseCase>) -> Self {
        Self {
            answer,
            subject: ChatSubject::General,
            show_progress: true,
            format: OutputFormat::Answer,
            history_window: DEFAULT_HISTORY_WINDOW,
            history_file: dirs::data_dir().map(|p| p.join("snapstudy").join("history.txt")),
        }
    }

    /// Chat about a loaded document
    pub fn with_context(mut self, context: SourceContext) -> Self {
        self.subject = ChatSubject::Source(context);
        self
    }

    /// Chat about a summarized video
    pub fn with_video(mut self, use_case: Arc<SummarizeVideoUseCase>, summary: VideoSummary) -> Self {
        self.subject = ChatSubject::Video { use_case, summary };
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Number of past turns sent with each question
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Override where readline history is stored
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_file = path;
        }
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(path) = &self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();
        let mut history = History::new();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        match self.handle_command(line, &history) {
                            CommandOutcome::Quit => break,
                            CommandOutcome::Clear => {
                                history = History::new();
                                println!("Conversation cleared.");
                            }
                            CommandOutcome::Continue => {}
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    println!();
                    match self.process_question(line, &history).await {
                        Ok(answer) => {
                            self.print_answer(&answer);
                            history.record_exchange(line, answer.text);
                        }
                        Err(e) => eprintln!("{} {}", "Error:".red().bold(), e),
                    }
                    println!();
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

        if let Some(path) = &self.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn subject_line(&self) -> String {
        match &self.subject {
            ChatSubject::General => "no source (general chat)".to_string(),
            ChatSubject::Source(context) => format!(
                "{} \"{}\" ({} characters)",
                context.kind.as_str(),
                context.source_name,
                context.char_len()
            ),
            ChatSubject::Video { summary, .. } => format!("video \"{}\"", summary.title),
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            snapstudy - Chat Mode            │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Source: {}", self.subject_line());
        println!(
            "Providers: {}",
            self.answer
                .providers()
                .iter()
                .map(|p| p.id().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /source   - Show what the chat is about");
        println!("  /history  - Show the conversation so far");
        println!("  /clear    - Forget the conversation");
        println!("  /quit     - Exit chat");
        println!();
    }

    fn handle_command(&self, cmd: &str, history: &History) -> CommandOutcome {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                CommandOutcome::Quit
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /source          - Show what the chat is about");
                println!("  /history         - Show the conversation so far");
                println!("  /clear           - Forget the conversation");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                CommandOutcome::Continue
            }
            "/source" => {
                println!("Source: {}", self.subject_line());
                CommandOutcome::Continue
            }
            "/history" => {
                if history.is_empty() {
                    println!("(no messages yet)");
                }
                for turn in history.turns() {
                    println!(
                        "{} {}",
                        format!("[{}]", turn.role.as_str()).dimmed(),
                        ConsoleFormatter::first_line(&turn.content)
                    );
                }
                CommandOutcome::Continue
            }
            "/clear" => CommandOutcome::Clear,
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                CommandOutcome::Continue
            }
        }
    }

    async fn process_question(&self, line: &str, history: &History) -> Result<Answer, AnswerError> {
        let question = Question::new(line)?;
        let turns = history.window(self.history_window).to_vec();

        let reporter;
        let progress: &dyn ProgressNotifier = if self.show_progress {
            reporter = ProgressReporter::new();
            &reporter
        } else {
            &NoProgress
        };

        match &self.subject {
            ChatSubject::Video { use_case, summary } => {
                use_case.chat(question, summary, turns, progress).await
            }
            subject => {
                let mut input = AnswerInput::new(question).with_history(turns);
                if let ChatSubject::Source(context) = subject {
                    input = input.with_context(context.clone());
                }
                self.answer
                    .execute_with_progress(input, progress)
                    .await
                    .map(|output| output.answer)
            }
        }
    }

    fn print_answer(&self, answer: &Answer) {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(answer).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json);
            }
            OutputFormat::Full => {
                println!(
                    "{}\n",
                    format!("({})", ConsoleFormatter::describe_resolution(&answer.resolution)).dimmed()
                );
                println!("{}", answer.text);
            }
            OutputFormat::Answer => println!("{}", answer.text),
        }
    }
}

enum CommandOutcome {
    Continue,
    Clear,
    Quit,
}
