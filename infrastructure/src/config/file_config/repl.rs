//! Chat REPL configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Path to the line-editor history file
    pub history_file: Option<String>,
}
