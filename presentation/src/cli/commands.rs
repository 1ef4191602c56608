//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use snapstudy_domain::ComparisonType;
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the answer text
    Answer,
    /// Answer plus how it was produced
    Full,
    /// JSON output
    Json,
}

impl From<snapstudy_domain::OutputFormat> for OutputFormat {
    fn from(format: snapstudy_domain::OutputFormat) -> Self {
        match format {
            snapstudy_domain::OutputFormat::Answer => OutputFormat::Answer,
            snapstudy_domain::OutputFormat::Full => OutputFormat::Full,
            snapstudy_domain::OutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for snapstudy
#[derive(Parser, Debug)]
#[command(name = "snapstudy")]
#[command(author, version, about = "Ask several LLM providers about a document or video and get one answer")]
#[command(long_about = r#"
snapstudy sends your question about a document or video to every configured
LLM provider at once and merges their answers into one.

How an answer is produced:
1. Fan-out: all providers answer concurrently (bounded by a timeout)
2. Synthesis: two or more answers are merged by the synthesizer provider
3. Fallback: one answer is returned as is; a timeout falls back to one provider

Configuration files are loaded from (in priority order):
1. SNAPSTUDY_* environment variables
2. --config <path>                          Explicit config file
3. ./snapstudy.toml or ./.snapstudy.toml   Project-level config
4. ~/.config/snapstudy/config.toml          Global config

Example:
  snapstudy ask -f notes.md "What are the key points?"
  snapstudy compare a.txt b.txt --type differences
  snapstudy video https://youtu.be/dQw4w9WgXcQ --chat
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (defaults to [output] format in config, then "answer")
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use offline mock providers instead of the hosted APIs
    #[arg(long, global = true)]
    pub mock: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask one question, optionally about a file
    Ask {
        /// The question to ask
        question: String,

        /// Text or markdown file to use as context
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Start an interactive chat, optionally about a file
    Chat {
        /// Text or markdown file to use as context
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Produce a structured analysis of a document
    Analyze {
        /// Text or markdown file to analyze
        file: PathBuf,
    },

    /// Compare two documents
    Compare {
        first: PathBuf,
        second: PathBuf,

        /// similarity, differences, summary, key-points or structure
        #[arg(short = 't', long = "type", default_value = "similarity")]
        comparison_type: ComparisonType,

        /// Replace the built-in comparison request
        #[arg(long, value_name = "TEXT")]
        prompt: Option<String>,
    },

    /// Summarize a YouTube video
    Video {
        /// Video URL (youtube.com/watch, youtu.be, /embed/ or /v/)
        url: String,

        /// Keep chatting about the video after the summary
        #[arg(long)]
        chat: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ask_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "snapstudy", "ask", "-f", "notes.md", "What is this?", "--mock", "-o", "json",
        ])
        .unwrap();

        assert!(cli.mock);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        match cli.command {
            Some(Command::Ask { question, file }) => {
                assert_eq!(question, "What is this?");
                assert_eq!(file, Some(PathBuf::from("notes.md")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_compare_type() {
        let cli = Cli::try_parse_from([
            "snapstudy", "compare", "a.txt", "b.txt", "--type", "key_points",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Some(Command::Compare { comparison_type: ComparisonType::KeyPoints, .. })
        ));
    }

    #[test]
    fn test_unknown_compare_type_is_rejected() {
        let result = Cli::try_parse_from(["snapstudy", "compare", "a.txt", "b.txt", "-t", "vibes"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::try_parse_from(["snapstudy", "-vv", "--show-config"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
