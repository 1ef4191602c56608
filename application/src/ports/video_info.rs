//! Video metadata port

use async_trait::async_trait;
use snapstudy_domain::VideoInfo;
use thiserror::Error;

/// Errors raised while resolving video metadata
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VideoError {
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("Video not found: {0}")]
    NotFound(String),

    #[error("Failed to fetch video info: {0}")]
    Fetch(String),
}

/// Source of video metadata (oEmbed in production, fixtures in tests)
#[async_trait]
pub trait VideoInfoSource: Send + Sync {
    async fn fetch(&self, video_id: &str) -> Result<VideoInfo, VideoError>;
}
