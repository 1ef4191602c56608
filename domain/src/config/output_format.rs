//! Output format value object

use serde::{Deserialize, Serialize};

/// How an answer is rendered on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Only the answer text (default)
    #[default]
    Answer,
    /// Answer plus resolution path and per-provider outcomes
    Full,
    /// JSON output
    Json,
}
