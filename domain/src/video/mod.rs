//! Video domain: YouTube URL handling and metadata rendered as context.

mod info;
mod url;

pub use info::{VideoInfo, VideoSummary};
pub use url::{ThumbnailQuality, extract_video_id, is_valid_video_url, thumbnail_url};
