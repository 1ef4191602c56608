//! Prompt domain
//!
//! One set of templates shared by every provider, parameterized by provider
//! name and source kind.

mod template;

pub use template::PromptTemplate;
