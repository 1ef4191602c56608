//! Per-query state machine
//!
//! ```text
//! Idle -> FanningOut -> AwaitingSynthesis -> Done
//!                    -> DirectReturn
//!                    -> AllFailed
//!                    -> SingleProvider -> DirectReturn | AllFailed
//! Idle -> SingleProvider
//! ```

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Phase of a single user query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryPhase {
    Idle,
    /// All providers are being queried concurrently
    FanningOut,
    /// Two or more providers answered; the synthesizer is merging them
    AwaitingSynthesis,
    /// One provider answers alone (plain chat, or the fan-out timed out)
    SingleProvider,
    /// Exactly one answer was available and returned unchanged
    DirectReturn,
    /// Nothing usable came back
    AllFailed,
    /// A synthesized (or longest-fallback) answer was produced
    Done,
}

impl QueryPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryPhase::Idle => "idle",
            QueryPhase::FanningOut => "fanning_out",
            QueryPhase::AwaitingSynthesis => "awaiting_synthesis",
            QueryPhase::SingleProvider => "single_provider",
            QueryPhase::DirectReturn => "direct_return",
            QueryPhase::AllFailed => "all_failed",
            QueryPhase::Done => "done",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            QueryPhase::Idle => "Idle",
            QueryPhase::FanningOut => "Asking providers",
            QueryPhase::AwaitingSynthesis => "Synthesizing",
            QueryPhase::SingleProvider => "Asking single provider",
            QueryPhase::DirectReturn => "Answer ready",
            QueryPhase::AllFailed => "All providers failed",
            QueryPhase::Done => "Done",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QueryPhase::DirectReturn | QueryPhase::AllFailed | QueryPhase::Done
        )
    }

    pub fn can_transition_to(&self, next: QueryPhase) -> bool {
        use QueryPhase::*;
        matches!(
            (self, next),
            (Idle, FanningOut)
                | (Idle, SingleProvider)
                | (FanningOut, AwaitingSynthesis)
                | (FanningOut, DirectReturn)
                | (FanningOut, AllFailed)
                | (FanningOut, SingleProvider)
                | (SingleProvider, DirectReturn)
                | (SingleProvider, AllFailed)
                | (AwaitingSynthesis, Done)
        )
    }
}

impl std::fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Tracks the phases one query has gone through (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRun {
    phase: QueryPhase,
    trail: Vec<QueryPhase>,
}

impl Default for QueryRun {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryRun {
    pub fn new() -> Self {
        Self {
            phase: QueryPhase::Idle,
            trail: vec![QueryPhase::Idle],
        }
    }

    pub fn phase(&self) -> QueryPhase {
        self.phase
    }

    /// Every phase visited so far, starting with `Idle`
    pub fn trail(&self) -> &[QueryPhase] {
        &self.trail
    }

    pub fn advance(&mut self, next: QueryPhase) -> Result<(), DomainError> {
        if !self.phase.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.phase.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        self.phase = next;
        self.trail.push(next);
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesis_path() {
        let mut run = QueryRun::new();
        run.advance(QueryPhase::FanningOut).unwrap();
        run.advance(QueryPhase::AwaitingSynthesis).unwrap();
        assert!(!run.is_finished());
        run.advance(QueryPhase::Done).unwrap();
        assert!(run.is_finished());
        assert_eq!(run.trail().len(), 4);
    }

    #[test]
    fn test_timeout_falls_back_to_single_provider() {
        let mut run = QueryRun::new();
        run.advance(QueryPhase::FanningOut).unwrap();
        run.advance(QueryPhase::SingleProvider).unwrap();
        run.advance(QueryPhase::DirectReturn).unwrap();
        assert_eq!(run.phase(), QueryPhase::DirectReturn);
    }

    #[test]
    fn test_terminal_phases_are_final() {
        for terminal in [QueryPhase::DirectReturn, QueryPhase::AllFailed, QueryPhase::Done] {
            assert!(terminal.is_terminal());
            assert!(!terminal.can_transition_to(QueryPhase::FanningOut));
            assert!(!terminal.can_transition_to(QueryPhase::Idle));
        }
    }

    #[test]
    fn test_invalid_transition_is_rejected() {
        let mut run = QueryRun::new();
        let err = run.advance(QueryPhase::Done).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(run.phase(), QueryPhase::Idle);
    }
}
