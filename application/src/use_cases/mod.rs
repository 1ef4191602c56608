//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyze_document;
pub mod answer;
pub mod compare_documents;
pub mod fan_out;
pub mod summarize_video;
pub mod synthesize;

#[cfg(test)]
pub(crate) mod testing;
