//! Orchestration domain: the lifecycle and results of one fan-out query.
//!
//! - [`state::QueryPhase`] / [`state::QueryRun`]: per-query state machine
//! - [`value_objects::ProviderResult`]: one provider's outcome
//! - [`value_objects::SynthesisInput`]: results handed to the synthesizer,
//!   including the longest-response tie-break rule
//! - [`value_objects::Answer`]: final text plus its [`value_objects::Resolution`]

pub mod state;
pub mod value_objects;
