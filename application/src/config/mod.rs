//! Application-level configuration.
//!
//! - [`OrchestrationConfig`]: fan-out routing, timeouts, synthesizer choice
//!   and context budgets

pub mod orchestration;

pub use orchestration::OrchestrationConfig;
