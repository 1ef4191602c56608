//! Domain layer for snapstudy
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Fan-out
//!
//! A question about a document or video is sent to every enabled hosted
//! provider at once. Each outcome becomes a [`ProviderResult`]; the
//! successful ones are merged by a synthesizer into a single [`Answer`].
//!
//! ## Resolution
//!
//! Every [`Answer`] records how it was reached (direct, synthesized,
//! longest-response fallback, or a single provider after a timeout).

pub mod analysis;
pub mod config;
pub mod conversation;
pub mod core;
pub mod generation;
pub mod orchestration;
pub mod prompt;
pub mod source;
pub mod video;

// Re-export commonly used types
pub use analysis::{
    comparison::{ComparisonResult, ComparisonType},
    tags::{ContentTags, Sentiment},
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use conversation::entities::{ConversationTurn, History, Role};
pub use crate::core::{error::DomainError, provider::ProviderId, question::Question};
pub use generation::GenerationParams;
pub use orchestration::{
    state::{QueryPhase, QueryRun},
    value_objects::{Answer, ProviderResult, Resolution, SynthesisInput},
};
pub use prompt::PromptTemplate;
pub use source::{
    budget::ContextBudget,
    entities::{SourceContext, SourceKind},
    stats::TextStats,
};
pub use video::{VideoInfo, VideoSummary};
