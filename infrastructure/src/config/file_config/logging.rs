//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the daily-rotated diagnostic log; console only when unset.
    pub log_dir: Option<String>,
    /// Path of the JSONL conversation log; disabled when unset.
    pub conversation_log: Option<String>,
}
