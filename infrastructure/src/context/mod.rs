//! Local content loading
//!
//! - [`ContentLoader`] reads plain-text sources from disk into document contexts
//! - [`KeyInfo`] scans loaded text for emails, URLs, dates and phone numbers

mod key_info;
mod loader;

pub use key_info::KeyInfo;
pub use loader::{ContentLoadError, ContentLoader, ContentType, LoadedContent, format_file_size};
