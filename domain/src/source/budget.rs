//! Character budgets for context included in provider requests

use serde::{Deserialize, Serialize};

/// Character budgets applied to source text before it leaves the process.
///
/// | Path | Budget |
/// |------|--------|
/// | Primary attempt | 12,000 |
/// | Fallback attempt | 10,000 |
/// | Document analysis | 10,000 |
/// | Each document in a comparison | 4,000 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBudget {
    pub primary_chars: usize,
    pub fallback_chars: usize,
    pub analysis_chars: usize,
    pub comparison_chars: usize,
}

impl Default for ContextBudget {
    fn default() -> Self {
        Self {
            primary_chars: 12_000,
            fallback_chars: 10_000,
            analysis_chars: 10_000,
            comparison_chars: 4_000,
        }
    }
}

impl ContextBudget {
    pub fn with_primary_chars(mut self, chars: usize) -> Self {
        self.primary_chars = chars;
        self
    }

    pub fn with_fallback_chars(mut self, chars: usize) -> Self {
        self.fallback_chars = chars;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let budget = ContextBudget::default();
        assert_eq!(budget.primary_chars, 12_000);
        assert_eq!(budget.fallback_chars, 10_000);
        assert_eq!(budget.comparison_chars, 4_000);
    }
}
