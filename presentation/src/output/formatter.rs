//! Output formatter trait

use crate::cli::commands::OutputFormat;

/// Something the CLI can print in every [`OutputFormat`]
pub trait ConsoleView {
    /// Concise, human-readable rendering
    fn plain(&self) -> String;

    /// Human-readable rendering with provenance details
    fn full(&self) -> String;

    /// Machine-readable rendering
    fn json(&self) -> serde_json::Value;

    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => self.plain(),
            OutputFormat::Full => self.full(),
            OutputFormat::Json => {
                serde_json::to_string_pretty(&self.json()).unwrap_or_else(|_| "{}".to_string())
            }
        }
    }
}
