//! Source entities

use crate::core::string::{char_len, take_chars};
use serde::{Deserialize, Serialize};

/// What kind of source the context text was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Document,
    Video,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Document => "document",
            SourceKind::Video => "video",
        }
    }
}

/// Plain text extracted from an uploaded file or video metadata.
///
/// Supplied by content extractors and embedded into provider requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceContext {
    /// Label used in prompts (file name or video title)
    pub source_name: String,
    pub kind: SourceKind,
    pub text: String,
}

impl SourceContext {
    pub fn document(source_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            kind: SourceKind::Document,
            text: text.into(),
        }
    }

    pub fn video(source_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            kind: SourceKind::Video,
            text: text.into(),
        }
    }

    /// Length of the text in characters
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }

    /// Copy of this context with the text cut to `max_chars` characters
    pub fn truncated(&self, max_chars: usize) -> Self {
        Self {
            source_name: self.source_name.clone(),
            kind: self.kind,
            text: take_chars(&self.text, max_chars).to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_keeps_metadata() {
        let ctx = SourceContext::video("Talk", "abcdef");
        let cut = ctx.truncated(2);
        assert_eq!(cut.text, "ab");
        assert_eq!(cut.source_name, "Talk");
        assert_eq!(cut.kind, SourceKind::Video);
    }

    #[test]
    fn test_truncated_exact_budget() {
        let ctx = SourceContext::document("big.txt", "x".repeat(15_000));
        assert_eq!(ctx.truncated(12_000).char_len(), 12_000);
        assert_eq!(ctx.truncated(20_000).char_len(), 15_000);
    }

    #[test]
    fn test_blank_context() {
        assert!(SourceContext::document("a", "  \n").is_blank());
        assert!(!SourceContext::document("a", "text").is_blank());
    }
}
