//! Orchestration configuration from TOML (`[orchestration]` section)

use serde::{Deserialize, Serialize};
use snapstudy_domain::{ConfigIssue, ConfigIssueCode, ProviderId};

/// Value of `synthesizer` that turns synthesis off.
pub const NO_SYNTHESIZER: &str = "none";

/// Fan-out routing and timing.
///
/// # Example
///
/// ```toml
/// [orchestration]
/// fanout_timeout_secs = 90
/// synthesizer = "openai"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestrationConfig {
    pub fanout_timeout_secs: u64,
    pub chat_timeout_secs: u64,
    /// Context must be longer than this to trigger a fan-out.
    pub min_fanout_context_chars: usize,
    /// Trailing history turns sent on the primary attempt.
    pub history_window: usize,
    /// Trailing history turns sent on the fallback attempt.
    pub fallback_history_window: usize,
    /// Provider that merges responses, or `"none"`.
    pub synthesizer: String,
    /// Provider for plain chat and the timeout fallback.
    pub direct_provider: String,
}

impl Default for FileOrchestrationConfig {
    fn default() -> Self {
        Self {
            fanout_timeout_secs: 120,
            chat_timeout_secs: 60,
            min_fanout_context_chars: 100,
            history_window: 10,
            fallback_history_window: 8,
            synthesizer: "groq".to_string(),
            direct_provider: "groq".to_string(),
        }
    }
}

impl FileOrchestrationConfig {
    /// Parse `synthesizer`; `None` when disabled or unknown.
    pub fn parse_synthesizer(&self) -> (Option<ProviderId>, Vec<ConfigIssue>) {
        if self.synthesizer.trim().eq_ignore_ascii_case(NO_SYNTHESIZER) {
            return (None, vec![]);
        }
        parse_provider("orchestration.synthesizer", &self.synthesizer)
    }

    pub fn parse_direct_provider(&self) -> (Option<ProviderId>, Vec<ConfigIssue>) {
        parse_provider("orchestration.direct_provider", &self.direct_provider)
    }

    pub(super) fn zero_value_issues(&self) -> Vec<ConfigIssue> {
        [
            ("orchestration.fanout_timeout_secs", self.fanout_timeout_secs as usize),
            ("orchestration.chat_timeout_secs", self.chat_timeout_secs as usize),
            ("orchestration.history_window", self.history_window),
            ("orchestration.fallback_history_window", self.fallback_history_window),
        ]
        .into_iter()
        .filter(|(_, value)| *value == 0)
        .map(|(field, _)| {
            ConfigIssue::error(
                ConfigIssueCode::ZeroValue {
                    field: field.to_string(),
                },
                format!("{} must be greater than 0", field),
            )
        })
        .collect()
    }
}

fn parse_provider(field: &str, value: &str) -> (Option<ProviderId>, Vec<ConfigIssue>) {
    match value.parse::<ProviderId>() {
        Ok(id) => (Some(id), vec![]),
        Err(_) => (
            None,
            vec![ConfigIssue::error(
                ConfigIssueCode::UnknownProvider {
                    field: field.to_string(),
                    value: value.to_string(),
                },
                format!(
                    "{}: unknown provider '{}' (expected openai, openrouter, groq or gemini)",
                    field, value
                ),
            )],
        ),
    }
}
