//! Interactive chat module
//!
//! Provides a readline-based chat about a document, a video or nothing in
//! particular.

mod repl;

pub use repl::ChatRepl;
