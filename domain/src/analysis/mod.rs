//! Text analysis helpers applied to model output.
//!
//! - [`tags`]: heuristic key points, topics and sentiment (text in, tags out)
//! - [`comparison`]: two-document comparison prompts and result parsing

pub mod comparison;
pub mod tags;
