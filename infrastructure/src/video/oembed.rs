//! YouTube oEmbed client

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use snapstudy_application::{VideoError, VideoInfoSource};
use snapstudy_domain::VideoInfo;
use snapstudy_domain::video::{ThumbnailQuality, thumbnail_url};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
    author_name: Option<String>,
    thumbnail_url: Option<String>,
}

/// Resolves title, channel and thumbnail through `/oembed`.
///
/// oEmbed carries no description, duration or transcript; those stay empty.
pub struct OEmbedVideoSource {
    client: Client,
    base_url: String,
}

impl OEmbedVideoSource {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for OEmbedVideoSource {
    fn default() -> Self {
        Self::new(Client::new())
    }
}

#[async_trait]
impl VideoInfoSource for OEmbedVideoSource {
    async fn fetch(&self, video_id: &str) -> Result<VideoInfo, VideoError> {
        let url = format!("{}/oembed", self.base_url.trim_end_matches('/'));
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
        debug!("Fetching oEmbed metadata for {}", video_id);

        let response = self
            .client
            .get(url)
            .query(&[("url", watch_url.as_str()), ("format", "json")])
            .send()
            .await
            .map_err(|e| VideoError::Fetch(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(VideoError::NotFound(video_id.to_string()));
            }
            status if !status.is_success() => {
                return Err(VideoError::Fetch(format!("oEmbed returned HTTP {}", status.as_u16())));
            }
            _ => {}
        }

        let body: OEmbedResponse = response
            .json()
            .await
            .map_err(|e| VideoError::Fetch(e.to_string()))?;

        Ok(VideoInfo {
            id: video_id.to_string(),
            title: body.title.unwrap_or_else(|| "Unknown Title".to_string()),
            description: String::new(),
            channel_title: body
                .author_name
                .unwrap_or_else(|| "Unknown Channel".to_string()),
            duration: None,
            thumbnail_url: body
                .thumbnail_url
                .unwrap_or_else(|| thumbnail_url(video_id, ThumbnailQuality::MaxRes)),
            transcript: None,
        })
    }
}
