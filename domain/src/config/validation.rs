//! Structured configuration issues.
//!
//! Produced by the infrastructure config loader after merging all sources,
//! so the CLI can print warnings and refuse to start on errors.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The configuration cannot work at all.
    Error,
    /// The configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A provider name that does not map to a known provider.
    UnknownProvider { field: String, value: String },
    /// A timeout, budget or window that must be positive is zero.
    ZeroValue { field: String },
    /// Every provider is disabled.
    NoProvidersEnabled,
    /// An enabled provider has no API key in config or environment.
    MissingApiKey { provider: String },
    /// The synthesizer is not among the enabled providers.
    SynthesizerDisabled { provider: String },
    /// The fallback context budget exceeds the primary one.
    FallbackBudgetTooLarge,
}

/// A detected issue in the merged configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", label, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_severity() {
        let issue = ConfigIssue::warning(
            ConfigIssueCode::MissingApiKey {
                provider: "groq".to_string(),
            },
            "no API key for groq",
        );
        assert!(!issue.is_error());
        assert_eq!(issue.to_string(), "warning: no API key for groq");
    }
}
