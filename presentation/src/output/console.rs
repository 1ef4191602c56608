//! Console output for answers and one-shot operations

use crate::output::formatter::ConsoleView;
use colored::Colorize;
use serde_json::json;
use snapstudy_application::{AnswerOutput, DocumentAnalysis, DocumentComparison};
use snapstudy_domain::{ConfigIssue, QueryPhase, Resolution, VideoSummary};

/// Shared layout helpers for console output
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Force colors off (or back to terminal detection)
    pub fn set_color(enabled: bool) {
        if enabled {
            colored::control::unset_override();
        } else {
            colored::control::set_override(false);
        }
    }

    /// One-line description of how an answer was produced
    pub fn describe_resolution(resolution: &Resolution) -> String {
        match resolution {
            Resolution::Direct { provider } => format!("single response from {}", provider),
            Resolution::Synthesized {
                synthesizer,
                sources,
            } => format!("synthesized by {} from {} responses", synthesizer, sources),
            Resolution::LongestFallback { provider, sources } => format!(
                "longest of {} responses ({}), synthesis unavailable",
                sources, provider
            ),
            Resolution::SingleProvider { provider } => format!("answered by {} alone", provider),
        }
    }

    pub fn describe_trail(trail: &[QueryPhase]) -> String {
        trail
            .iter()
            .map(|phase| phase.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Config warnings and errors, one per line
    pub fn format_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| {
                if issue.is_error() {
                    format!("{} {}", "error:".red().bold(), issue.message)
                } else {
                    format!("{} {}", "warning:".yellow().bold(), issue.message)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// First line of `text`, cut to 80 characters
    pub fn first_line(text: &str) -> String {
        let line = text.lines().next().unwrap_or_default();
        if line.chars().count() > 80 {
            format!("{}...", line.chars().take(77).collect::<String>())
        } else {
            line.to_string()
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    fn bullets(items: &[String]) -> String {
        items
            .iter()
            .map(|item| format!("  * {}\n", item))
            .collect()
    }
}

/// An answer together with the question it answers
pub struct AnswerView<'a> {
    pub question: &'a str,
    pub output: &'a AnswerOutput,
}

impl ConsoleView for AnswerView<'_> {
    fn plain(&self) -> String {
        self.output.answer.text.clone()
    }

    fn full(&self) -> String {
        let mut output = ConsoleFormatter::header("snapstudy Answer");
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Question:".cyan().bold(), self.question));
        output.push_str(&format!(
            "{} {}\n",
            "Source:".cyan().bold(),
            ConsoleFormatter::describe_resolution(&self.output.answer.resolution)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Path:".dimmed(),
            ConsoleFormatter::describe_trail(&self.output.trail)
        ));
        output.push_str(&ConsoleFormatter::section_header("Answer"));
        output.push_str(&self.output.answer.text);
        output.push('\n');
        output.push_str(&ConsoleFormatter::footer());
        output
    }

    fn json(&self) -> serde_json::Value {
        json!({
            "question": self.question,
            "answer": self.output.answer.text,
            "resolution": self.output.answer.resolution,
            "trail": self.output.trail,
        })
    }
}

impl ConsoleView for DocumentAnalysis {
    fn plain(&self) -> String {
        self.analysis.clone()
    }

    fn full(&self) -> String {
        let mut output = ConsoleFormatter::header(&format!("Analysis: {}", self.source_name));
        output.push('\n');
        output.push_str(&format!(
            "{} {} words, {} characters, ~{} min read\n",
            "Document:".cyan().bold(),
            self.stats.word_count,
            self.stats.character_count,
            self.stats.reading_minutes
        ));
        output.push_str(&format!("{} {}\n", "Provider:".cyan().bold(), self.provider));
        output.push_str(&ConsoleFormatter::section_header("Analysis"));
        output.push_str(&self.analysis);
        output.push('\n');
        output.push_str(&ConsoleFormatter::footer());
        output
    }

    fn json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl ConsoleView for DocumentComparison {
    fn plain(&self) -> String {
        let mut output = String::new();
        if let Some(similarity) = self.comparison.overall_similarity {
            output.push_str(&format!("{} {}%\n\n", "Overall similarity:".bold(), similarity));
        }
        output.push_str(&self.comparison.detailed_analysis);
        output
    }

    fn full(&self) -> String {
        let mut output = ConsoleFormatter::header(&format!(
            "Comparison: {}",
            self.comparison.comparison_type
        ));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Source:".cyan().bold(),
            ConsoleFormatter::describe_resolution(&self.resolution)
        ));
        if let Some(similarity) = self.comparison.overall_similarity {
            output.push_str(&format!("{} {}%\n", "Similarity:".cyan().bold(), similarity));
        }
        output.push_str(&ConsoleFormatter::section_header("Summary"));
        output.push_str(&self.comparison.summary);
        output.push('\n');
        output.push_str(&ConsoleFormatter::section_header("Detailed Analysis"));
        output.push_str(&self.comparison.detailed_analysis);
        output.push('\n');
        output.push_str(&ConsoleFormatter::footer());
        output
    }

    fn json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl ConsoleView for VideoSummary {
    fn plain(&self) -> String {
        format!("{}\n\n{}", self.title.bold(), self.summary)
    }

    fn full(&self) -> String {
        let mut output = ConsoleFormatter::header(&self.title);
        output.push('\n');
        if let Some(duration) = &self.duration {
            output.push_str(&format!("{} {}\n", "Duration:".cyan().bold(), duration));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Sentiment:".cyan().bold(),
            self.sentiment.as_str()
        ));
        if !self.topics.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Topics:".cyan().bold(),
                self.topics.join(", ")
            ));
        }
        output.push_str(&ConsoleFormatter::section_header("Summary"));
        output.push_str(&self.summary);
        output.push('\n');
        if !self.key_points.is_empty() {
            output.push_str(&format!("\n{}\n", "Key Points:".green().bold()));
            output.push_str(&ConsoleFormatter::bullets(&self.key_points));
        }
        output.push_str(&ConsoleFormatter::footer());
        output
    }

    fn json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
