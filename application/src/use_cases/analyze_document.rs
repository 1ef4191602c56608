//! Analyze Document use case
//!
//! One structured analysis of a single document through the direct provider.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::provider::ProviderRequest;
use crate::use_cases::answer::{AnswerError, AnswerUseCase};
use serde::Serialize;
use snapstudy_domain::core::string::take_chars;
use snapstudy_domain::{PromptTemplate, ProviderId, SourceContext, TextStats};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeDocumentError {
    #[error("Document \"{0}\" has no text to analyze")]
    EmptyDocument(String),

    #[error(transparent)]
    Answer(#[from] AnswerError),
}

/// Analysis text plus statistics over the full document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentAnalysis {
    pub source_name: String,
    pub analysis: String,
    pub provider: ProviderId,
    pub stats: TextStats,
}

pub struct AnalyzeDocumentUseCase {
    answer: Arc<AnswerUseCase>,
}

impl AnalyzeDocumentUseCase {
    pub fn new(answer: Arc<AnswerUseCase>) -> Self {
        Self { answer }
    }

    pub async fn execute(&self, document: &SourceContext) -> Result<DocumentAnalysis, AnalyzeDocumentError> {
        self.execute_with_progress(document, &NoProgress).await
    }

    /// Analyze the first `analysis_chars` characters of `document`.
    pub async fn execute_with_progress(
        &self,
        document: &SourceContext,
        progress: &dyn ProgressNotifier,
    ) -> Result<DocumentAnalysis, AnalyzeDocumentError> {
        if document.is_blank() {
            return Err(AnalyzeDocumentError::EmptyDocument(document.source_name.clone()));
        }

        let budget = self.answer.config().budget.analysis_chars;
        info!("Analyzing {} ({} chars, budget {})", document.source_name, document.char_len(), budget);

        let prompt = PromptTemplate::document_analysis(
            &document.source_name,
            take_chars(&document.text, budget),
        );
        let request = ProviderRequest::new(prompt);
        let (provider, analysis) = self.answer.ask_direct(&request, progress).await?;

        Ok(DocumentAnalysis {
            source_name: document.source_name.clone(),
            analysis,
            provider,
            stats: TextStats::of(&document.text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OrchestrationConfig;
    use crate::use_cases::testing::{ScriptedProvider, adapters};

    #[tokio::test]
    async fn test_analysis_uses_direct_provider_and_budget() {
        let openai = ScriptedProvider::ok(ProviderId::OpenAi, "openai").arc();
        let groq = ScriptedProvider::ok(ProviderId::Groq, "## Summary\nfine").arc();
        let providers = vec![openai.clone(), groq.clone()];
        let answer = Arc::new(AnswerUseCase::new(adapters(&providers), OrchestrationConfig::default()));
        let use_case = AnalyzeDocumentUseCase::new(answer);

        let text = format!("{}{}", "a".repeat(10_000), "b".repeat(500));
        let result = use_case
            .execute(&SourceContext::document("notes.md", text))
            .await
            .unwrap();

        assert_eq!(result.analysis, "## Summary\nfine");
        assert_eq!(result.provider, ProviderId::Groq);
        assert_eq!(result.stats.character_count, 10_500);
        assert_eq!(openai.request_count(), 0);

        let request = &groq.answer_requests()[0];
        assert!(request.message.contains("\"notes.md\""));
        assert!(request.message.contains(&"a".repeat(10_000)));
        assert!(!request.message.contains(&"b".repeat(10)));
        assert!(request.context.is_none());
    }

    #[tokio::test]
    async fn test_blank_document_is_rejected() {
        let providers = vec![ScriptedProvider::ok(ProviderId::Groq, "x").arc()];
        let answer = Arc::new(AnswerUseCase::new(adapters(&providers), OrchestrationConfig::default()));
        let use_case = AnalyzeDocumentUseCase::new(answer);

        let err = use_case
            .execute(&SourceContext::document("empty.txt", "  \n"))
            .await
            .unwrap_err();

        assert_eq!(err, AnalyzeDocumentError::EmptyDocument("empty.txt".to_string()));
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_as_answer_error() {
        let providers = vec![ScriptedProvider::failing(ProviderId::Groq, "down").arc()];
        let answer = Arc::new(AnswerUseCase::new(adapters(&providers), OrchestrationConfig::default()));
        let use_case = AnalyzeDocumentUseCase::new(answer);

        let err = use_case
            .execute(&SourceContext::document("a.txt", "content"))
            .await
            .unwrap_err();

        assert_eq!(err, AnalyzeDocumentError::Answer(AnswerError::AllProvidersFailed));
    }
}
