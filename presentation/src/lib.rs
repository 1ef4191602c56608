//! Presentation layer for snapstudy
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::{AnswerView, ConsoleFormatter};
pub use output::formatter::ConsoleView;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
