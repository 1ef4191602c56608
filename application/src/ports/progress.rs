//! Progress notification port
//!
//! Defines the interface for reporting progress while a query runs.

use snapstudy_domain::{ProviderId, QueryPhase};

/// Callback for progress updates during a query
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinners, plain lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: QueryPhase, total_tasks: usize);

    /// Called when one provider finishes within a phase
    fn on_provider_complete(&self, phase: QueryPhase, provider: ProviderId, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: QueryPhase);

    /// Called when the fan-out ran out of time
    fn on_timeout(&self, _phase: QueryPhase) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: QueryPhase, _total_tasks: usize) {}
    fn on_provider_complete(&self, _phase: QueryPhase, _provider: ProviderId, _success: bool) {}
    fn on_phase_complete(&self, _phase: QueryPhase) {}
}
