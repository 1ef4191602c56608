//! Plain-text content loader
//!
//! Accepts `.txt` and `.md` files up to a per-type size limit and turns them
//! into document [`SourceContext`]s named after the file.

use snapstudy_domain::{SourceContext, TextStats};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Minimum trimmed text length for a usable source
const MIN_TEXT_CHARS: usize = 10;

#[derive(Error, Debug)]
pub enum ContentLoadError {
    #[error("Unsupported file type: {0} (supported: .txt, .md)")]
    Unsupported(String),

    #[error("File size ({}) exceeds the maximum limit of {} for {kind} files", format_file_size(*.size), format_file_size(*.limit))]
    TooLarge { kind: ContentType, size: u64, limit: u64 },

    #[error("\"{0}\" does not contain enough text")]
    InsufficientText(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Supported plain-text formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Markdown,
}

impl ContentType {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" | "text" => Some(ContentType::Text),
            "md" | "markdown" => Some(ContentType::Markdown),
            _ => None,
        }
    }

    /// Largest accepted file in bytes
    pub fn max_size(&self) -> u64 {
        5 * 1024 * 1024
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Text => write!(f, "TXT"),
            ContentType::Markdown => write!(f, "MD"),
        }
    }
}

/// A source read from disk
#[derive(Debug, Clone)]
pub struct LoadedContent {
    pub context: SourceContext,
    pub content_type: ContentType,
    pub size_bytes: u64,
    pub stats: TextStats,
}

#[derive(Debug, Clone, Default)]
pub struct ContentLoader;

impl ContentLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> Result<LoadedContent, ContentLoadError> {
        let content_type = ContentType::from_path(path).ok_or_else(|| {
            ContentLoadError::Unsupported(
                path.extension()
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_else(|| path.display().to_string()),
            )
        })?;

        let io_error = |source| ContentLoadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let size_bytes = std::fs::metadata(path).map_err(io_error)?.len();
        let limit = content_type.max_size();
        if size_bytes > limit {
            return Err(ContentLoadError::TooLarge {
                kind: content_type,
                size: size_bytes,
                limit,
            });
        }

        let bytes = std::fs::read(path).map_err(io_error)?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if text.trim().chars().count() < MIN_TEXT_CHARS {
            return Err(ContentLoadError::InsufficientText(name));
        }

        let stats = TextStats::of(&text);
        debug!(
            "Loaded {} ({} bytes, {} words)",
            name, size_bytes, stats.word_count
        );

        Ok(LoadedContent {
            context: SourceContext::document(name, text),
            content_type,
            size_bytes,
            stats,
        })
    }
}

/// Human-readable byte count (`1.5 KB`, `5 MB`)
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_loads_markdown_as_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "Notes.MD", b"# Title\n\nSome study notes here.");

        let loaded = ContentLoader::new().load(&path).unwrap();

        assert_eq!(loaded.content_type, ContentType::Markdown);
        assert_eq!(loaded.context.source_name, "Notes.MD");
        assert!(loaded.context.text.contains("study notes"));
        assert_eq!(loaded.stats.word_count, 6);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "slides.pdf", b"%PDF-1.4");

        let err = ContentLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, ContentLoadError::Unsupported(ref ext) if ext == ".pdf"));
    }

    #[test]
    fn test_too_large_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(5 * 1024 * 1024 + 1).unwrap();

        let err = ContentLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, ContentLoadError::TooLarge { .. }));
        assert!(err.to_string().contains("maximum limit of 5 MB for TXT files"));
    }

    #[test]
    fn test_near_empty_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "empty.txt", b"  \n short \n");

        let err = ContentLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, ContentLoadError::InsufficientText(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ContentLoader::new()
            .load(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(matches!(err, ContentLoadError::Io { .. }));
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }
}
