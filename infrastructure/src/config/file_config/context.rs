//! Context budget configuration from TOML (`[context]` section)

use serde::{Deserialize, Serialize};
use snapstudy_domain::{ConfigIssue, ConfigIssueCode, ContextBudget};

/// Character budgets for outbound context.
///
/// # Example
///
/// ```toml
/// [context]
/// primary_budget = 12000
/// fallback_budget = 10000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileContextConfig {
    pub primary_budget: usize,
    pub fallback_budget: usize,
    pub analysis_budget: usize,
    pub comparison_budget: usize,
}

impl Default for FileContextConfig {
    fn default() -> Self {
        let budget = ContextBudget::default();
        Self {
            primary_budget: budget.primary_chars,
            fallback_budget: budget.fallback_chars,
            analysis_budget: budget.analysis_chars,
            comparison_budget: budget.comparison_chars,
        }
    }
}

impl FileContextConfig {
    /// Convert to the domain budget, returning validation issues.
    ///
    /// Zero budgets are errors and fall back to the default for that field.
    pub fn to_context_budget(&self) -> (ContextBudget, Vec<ConfigIssue>) {
        let defaults = ContextBudget::default();
        let mut issues = Vec::new();
        let mut pick = |field: &str, value: usize, default: usize| {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroValue {
                        field: format!("context.{}", field),
                    },
                    format!("context.{} must be greater than 0", field),
                ));
                default
            } else {
                value
            }
        };

        let budget = ContextBudget {
            primary_chars: pick("primary_budget", self.primary_budget, defaults.primary_chars),
            fallback_chars: pick("fallback_budget", self.fallback_budget, defaults.fallback_chars),
            analysis_chars: pick("analysis_budget", self.analysis_budget, defaults.analysis_chars),
            comparison_chars: pick(
                "comparison_budget",
                self.comparison_budget,
                defaults.comparison_chars,
            ),
        };

        if budget.fallback_chars > budget.primary_chars {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::FallbackBudgetTooLarge,
                format!(
                    "context.fallback_budget ({}) exceeds context.primary_budget ({})",
                    budget.fallback_chars, budget.primary_chars
                ),
            ));
        }

        (budget, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_config_default() {
        let config = FileContextConfig::default();
        assert_eq!(config.primary_budget, 12_000);
        assert_eq!(config.fallback_budget, 10_000);
        assert_eq!(config.analysis_budget, 10_000);
        assert_eq!(config.comparison_budget, 4_000);
    }

    #[test]
    fn test_context_config_deserialize() {
        let toml_str = r#"
[context]
primary_budget = 8000
fallback_budget = 6000
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.context.primary_budget, 8_000);
        assert_eq!(config.context.fallback_budget, 6_000);
        assert_eq!(config.context.comparison_budget, 4_000);
    }

    #[test]
    fn test_zero_budget_falls_back_to_default() {
        let config = FileContextConfig {
            primary_budget: 0,
            ..Default::default()
        };
        let (budget, issues) = config.to_context_budget();
        assert_eq!(budget.primary_chars, 12_000);
        assert_eq!(issues.len(), 1);
        assert!(matches!(&issues[0].code, ConfigIssueCode::ZeroValue { field } if field == "context.primary_budget"));
    }

    #[test]
    fn test_fallback_larger_than_primary_warns() {
        let config = FileContextConfig {
            primary_budget: 5_000,
            ..Default::default()
        };
        let (_, issues) = config.to_context_budget();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }
}
