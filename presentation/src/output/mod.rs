//! Console rendering of answers, analyses, comparisons and video summaries

pub mod console;
pub mod formatter;
