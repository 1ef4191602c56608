//! Source domain: the extracted text a question is asked about.
//!
//! - [`entities::SourceContext`]: extracted document or video text plus its name
//! - [`budget::ContextBudget`]: per-path character budgets for outbound requests
//! - [`stats::TextStats`]: word/character counts and reading time

pub mod budget;
pub mod entities;
pub mod stats;
