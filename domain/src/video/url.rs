//! YouTube URL parsing

use regex::Regex;
use std::sync::LazyLock;

/// URL forms that carry a video id, tried in order. Unanchored, so mobile and
/// music hosts and URLs inside surrounding text also match.
static ID_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([^&?#\s]+)",
        r"(?:https?://)?(?:www\.)?youtube\.com/embed/([^&?#\s]+)",
        r"(?:https?://)?(?:www\.)?youtu\.be/([^&?#\s]+)",
        r"(?:https?://)?(?:www\.)?youtube\.com/v/([^&?#\s]+)",
    ]
    .map(|pattern| Regex::new(pattern).expect("valid video url regex"))
});

/// Extract the video id from a YouTube URL.
///
/// Accepts `youtube.com/watch?v=`, `youtube.com/embed/`, `youtu.be/` and
/// `youtube.com/v/` forms anywhere in the input. The id ends at the first
/// `&`, `?`, `#` or whitespace.
pub fn extract_video_id(url: &str) -> Option<String> {
    ID_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|id| id.as_str().to_string())
    })
}

/// Check whether a URL points at a YouTube video
pub fn is_valid_video_url(url: &str) -> bool {
    extract_video_id(url).is_some()
}

/// Thumbnail sizes served by YouTube's image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThumbnailQuality {
    Default,
    Medium,
    High,
    #[default]
    MaxRes,
}

impl ThumbnailQuality {
    fn file_name(&self) -> &'static str {
        match self {
            ThumbnailQuality::Default => "default.jpg",
            ThumbnailQuality::Medium => "mqdefault.jpg",
            ThumbnailQuality::High => "hqdefault.jpg",
            ThumbnailQuality::MaxRes => "maxresdefault.jpg",
        }
    }
}

/// Thumbnail image URL for a video id
pub fn thumbnail_url(video_id: &str, quality: ThumbnailQuality) -> String {
    format!(
        "https://img.youtube.com/vi/{}/{}",
        video_id,
        quality.file_name()
    )
}
