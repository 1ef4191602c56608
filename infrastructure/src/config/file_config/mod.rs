//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod context;
mod logging;
mod mock;
mod orchestration;
mod output;
mod providers;
mod repl;

pub use context::FileContextConfig;
pub use logging::FileLoggingConfig;
pub use mock::{FileMockConfig, FileMockProviderConfig};
pub use orchestration::{FileOrchestrationConfig, NO_SYNTHESIZER};
pub use output::FileOutputConfig;
pub use providers::{FileProviderConfig, FileProvidersConfig};
pub use repl::FileReplConfig;

use serde::{Deserialize, Serialize};
use snapstudy_application::OrchestrationConfig;
use snapstudy_domain::{ConfigIssue, ConfigIssueCode, ProviderId};
use std::time::Duration;
use thiserror::Error;

/// Raised when the merged configuration contains errors
#[derive(Debug, Error)]
#[error("invalid configuration: {}", join_messages(.0))]
pub struct ConfigValidationError(pub Vec<ConfigIssue>);

fn join_messages(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// One section per hosted provider
    pub providers: FileProvidersConfig,
    /// Fan-out routing and timing
    pub orchestration: FileOrchestrationConfig,
    /// Character budgets
    pub context: FileContextConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Diagnostic and conversation logs
    pub logging: FileLoggingConfig,
    /// Chat REPL settings
    pub repl: FileReplConfig,
    /// Offline provider behavior for `--mock`
    pub mock: FileMockConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks provider names, zero timeouts/windows/budgets and whether any
    /// provider is enabled. API keys are environment-dependent and checked
    /// separately by [`Self::api_key_issues`].
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let (synthesizer, synth_issues) = self.orchestration.parse_synthesizer();
        issues.extend(synth_issues);
        issues.extend(self.orchestration.parse_direct_provider().1);
        issues.extend(self.orchestration.zero_value_issues());
        issues.extend(self.context.to_context_budget().1);

        let enabled = self.providers.enabled();
        if enabled.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoProvidersEnabled,
                "every provider is disabled",
            ));
        }

        if let Some(id) = synthesizer
            && !enabled.contains(&id)
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::SynthesizerDisabled {
                    provider: id.as_str().to_string(),
                },
                format!(
                    "synthesizer '{}' is disabled; multiple responses fall back to the longest",
                    id.as_str()
                ),
            ));
        }

        issues
    }

    /// Validate and split issues into warnings, failing on any error.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(|i| i.is_error());
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError(errors))
        }
    }

    /// Warnings for enabled providers that resolve to no API key.
    pub fn api_key_issues(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<ConfigIssue> {
        self.providers
            .enabled()
            .into_iter()
            .filter(|id| self.providers.get(*id).api_keys(&lookup).is_empty())
            .map(|id| {
                ConfigIssue::warning(
                    ConfigIssueCode::MissingApiKey {
                        provider: id.as_str().to_string(),
                    },
                    format!("{}: no API key found, provider skipped", id.display_name()),
                )
            })
            .collect()
    }

    /// Application-level orchestration parameters.
    ///
    /// Invalid values fall back to defaults; [`Self::validate`] reports them.
    pub fn to_orchestration_config(&self) -> OrchestrationConfig {
        let defaults = OrchestrationConfig::default();
        let o = &self.orchestration;
        let secs = |value: u64, default: Duration| {
            if value == 0 {
                default
            } else {
                Duration::from_secs(value)
            }
        };

        OrchestrationConfig {
            fanout_timeout: secs(o.fanout_timeout_secs, defaults.fanout_timeout),
            chat_timeout: secs(o.chat_timeout_secs, defaults.chat_timeout),
            min_fanout_context_chars: o.min_fanout_context_chars,
            synthesizer: o.parse_synthesizer().0,
            direct_provider: o.parse_direct_provider().0.or(defaults.direct_provider),
            budget: self.context.to_context_budget().0,
        }
    }

    pub fn enabled_providers(&self) -> Vec<ProviderId> {
        self.providers.enabled()
    }
}
