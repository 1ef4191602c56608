//! Summarize Video use case
//!
//! Resolves video metadata, summarizes it through the answer flow and
//! answers follow-up questions about the summary.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::video_info::{VideoError, VideoInfoSource};
use crate::use_cases::answer::{AnswerError, AnswerInput, AnswerUseCase};
use snapstudy_domain::video::extract_video_id;
use snapstudy_domain::{
    Answer, ContentTags, ConversationTurn, PromptTemplate, Question, VideoInfo, VideoSummary,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummarizeVideoError {
    #[error(transparent)]
    Video(#[from] VideoError),

    #[error(transparent)]
    Answer(#[from] AnswerError),
}

pub struct SummarizeVideoUseCase {
    answer: Arc<AnswerUseCase>,
    source: Arc<dyn VideoInfoSource>,
}

impl SummarizeVideoUseCase {
    pub fn new(answer: Arc<AnswerUseCase>, source: Arc<dyn VideoInfoSource>) -> Self {
        Self { answer, source }
    }

    /// Resolve the metadata of the video behind `url`.
    pub async fn fetch_info(&self, url: &str) -> Result<VideoInfo, SummarizeVideoError> {
        let video_id =
            extract_video_id(url).ok_or_else(|| VideoError::InvalidUrl(url.to_string()))?;
        info!("Fetching video info for {}", video_id);
        Ok(self.source.fetch(&video_id).await?)
    }

    pub async fn summarize_url(&self, url: &str) -> Result<VideoSummary, SummarizeVideoError> {
        let info = self.fetch_info(url).await?;
        self.summarize(&info).await
    }

    pub async fn summarize(&self, info: &VideoInfo) -> Result<VideoSummary, SummarizeVideoError> {
        self.summarize_with_progress(info, &NoProgress).await
    }

    /// Summarize the rendered metadata and derive tags from the summary text.
    pub async fn summarize_with_progress(
        &self,
        info: &VideoInfo,
        progress: &dyn ProgressNotifier,
    ) -> Result<VideoSummary, SummarizeVideoError> {
        let question = Question::new(PromptTemplate::video_summary_request())
            .map_err(AnswerError::State)?;
        let input = AnswerInput::new(question).with_context(info.to_context());
        let output = self.answer.execute_with_progress(input, progress).await?;

        let summary = output.answer.text;
        let tags = ContentTags::extract(&summary);
        Ok(VideoSummary {
            video_id: info.id.clone(),
            title: info.title.clone(),
            summary,
            key_points: tags.key_points,
            topics: tags.topics,
            sentiment: tags.sentiment,
            duration: info.duration.clone(),
        })
    }

    /// Answer a follow-up question with the video summary as context.
    pub async fn chat(
        &self,
        question: Question,
        summary: &VideoSummary,
        history: Vec<ConversationTurn>,
        progress: &dyn ProgressNotifier,
    ) -> Result<Answer, AnswerError> {
        let input = AnswerInput::new(question)
            .with_history(history)
            .with_context(summary.to_context());
        self.answer
            .execute_with_progress(input, progress)
            .await
            .map(|output| output.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrchestrationConfig;
    use crate::use_cases::testing::{ScriptedProvider, adapters};
    use async_trait::async_trait;
    use snapstudy_domain::{ProviderId, Sentiment, SourceKind};

    struct FixtureSource;

    #[async_trait]
    impl VideoInfoSource for FixtureSource {
        async fn fetch(&self, video_id: &str) -> Result<VideoInfo, VideoError> {
            if video_id != "dQw4w9WgXcQ" {
                return Err(VideoError::NotFound(video_id.to_string()));
            }
            Ok(VideoInfo {
                id: video_id.to_string(),
                title: "Learning Rust async".to_string(),
                description: "A walk through tokio tasks and channels for beginners.".to_string(),
                channel_title: "Rustacean Station".to_string(),
                duration: Some("12:34".to_string()),
                thumbnail_url: String::new(),
                transcript: None,
            })
        }
    }

    const SUMMARY: &str = "An excellent programming course.\n\n- Spawning tasks with tokio\n- Channels between tasks\n";

    fn use_case(providers: &[Arc<ScriptedProvider>]) -> SummarizeVideoUseCase {
        let answer = Arc::new(AnswerUseCase::new(adapters(providers), OrchestrationConfig::default()));
        SummarizeVideoUseCase::new(answer, Arc::new(FixtureSource))
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let providers = vec![ScriptedProvider::ok(ProviderId::Groq, SUMMARY).arc()];
        let err = use_case(&providers)
            .summarize_url("https://vimeo.com/123")
            .await
            .unwrap_err();
        assert!(matches!(err, SummarizeVideoError::Video(VideoError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_summary_carries_tags() {
        let providers = vec![ScriptedProvider::ok(ProviderId::Groq, SUMMARY).arc()];
        let summary = use_case(&providers)
            .summarize_url("https://youtu.be/dQw4w9WgXcQ")
            .await
            .unwrap();

        assert_eq!(summary.video_id, "dQw4w9WgXcQ");
        assert_eq!(summary.title, "Learning Rust async");
        assert_eq!(summary.key_points, vec!["Spawning tasks with tokio", "Channels between tasks"]);
        assert!(summary.topics.contains(&"Technology".to_string()));
        assert_eq!(summary.sentiment, Sentiment::Positive);
        assert_eq!(summary.duration.as_deref(), Some("12:34"));

        let request = &providers[0].answer_requests()[0];
        let context = request.context.as_ref().unwrap();
        assert_eq!(context.kind, SourceKind::Video);
        assert!(context.text.contains("Channel: Rustacean Station"));
    }

    #[tokio::test]
    async fn test_chat_uses_summary_as_context() {
        let providers = vec![ScriptedProvider::ok(ProviderId::Groq, SUMMARY).arc()];
        let use_case = use_case(&providers);
        let summary = use_case.summarize_url("youtube.com/watch?v=dQw4w9WgXcQ").await.unwrap();

        use_case
            .chat(
                Question::new("What are channels?").unwrap(),
                &summary,
                vec![],
                &NoProgress,
            )
            .await
            .unwrap();

        let request = providers[0].answer_requests().pop().unwrap();
        assert_eq!(request.message, "What are channels?");
        assert!(request.context.unwrap().text.contains("Spawning tasks with tokio"));
    }
}
