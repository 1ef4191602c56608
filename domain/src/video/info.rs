//! Video metadata and summaries

use crate::analysis::tags::Sentiment;
use crate::core::string::take_chars;
use crate::source::entities::SourceContext;
use serde::{Deserialize, Serialize};

const TRANSCRIPT_CHARS: usize = 3_000;

/// Metadata describing a video (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub channel_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub thumbnail_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

impl VideoInfo {
    /// Render the metadata as plain-text context for providers.
    ///
    /// At most the first 3,000 characters of a transcript are included.
    pub fn to_context(&self) -> SourceContext {
        let mut text = format!(
            "Title: {}\nChannel: {}\n",
            self.title, self.channel_title
        );
        if let Some(duration) = &self.duration {
            text.push_str(&format!("Duration: {}\n", duration));
        }
        if self.description.trim().is_empty() {
            text.push_str("Description: Not available\n");
        } else {
            text.push_str(&format!("Description: {}\n", self.description.trim()));
        }
        match &self.transcript {
            Some(transcript) if !transcript.trim().is_empty() => {
                text.push_str(&format!(
                    "\nTranscript:\n{}\n",
                    take_chars(transcript, TRANSCRIPT_CHARS)
                ));
            }
            _ => text.push_str("\nTranscript not available - analyze based on title and description\n"),
        }
        SourceContext::video(&self.title, text)
    }
}

/// Summary of a video with structured tags derived from the summary text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
    pub summary: String,
    pub key_points: Vec<String>,
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl VideoSummary {
    /// Context for follow-up questions about the video
    pub fn to_context(&self) -> SourceContext {
        let mut text = format!("Video title: {}\n\n{}\n", self.title, self.summary);
        if !self.key_points.is_empty() {
            text.push_str("\nKey points:\n");
            for point in &self.key_points {
                text.push_str(&format!("- {}\n", point));
            }
        }
        if !self.topics.is_empty() {
            text.push_str(&format!("\nTopics: {}\n", self.topics.join(", ")));
        }
        SourceContext::video(&self.title, text)
    }
}
