//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::ProviderId`]: hosted LLM APIs (OpenAI, OpenRouter, Groq, Gemini)
//! - [`question::Question`]: a validated question posed about a source
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod provider;
pub mod question;
pub mod string;
