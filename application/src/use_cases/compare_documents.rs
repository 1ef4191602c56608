//! Compare Documents use case
//!
//! Runs a two-document comparison through the answer flow.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::answer::{AnswerError, AnswerInput, AnswerUseCase};
use serde::Serialize;
use snapstudy_domain::{
    ComparisonResult, ComparisonType, ConversationTurn, DomainError, Question, Resolution,
    SourceContext,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

const DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareDocumentsError {
    #[error("At least 2 documents are required for comparison")]
    TooFewDocuments,

    #[error("Only 2-document comparison is supported (got {0})")]
    TooManyDocuments(usize),

    #[error(transparent)]
    InvalidPrompt(#[from] DomainError),

    #[error(transparent)]
    Answer(#[from] AnswerError),
}

/// Input for the Compare Documents use case
#[derive(Debug, Clone)]
pub struct CompareDocumentsInput {
    pub documents: Vec<SourceContext>,
    pub comparison_type: ComparisonType,
    /// Replaces the generated comparison request when set
    pub custom_prompt: Option<String>,
}

impl CompareDocumentsInput {
    pub fn new(documents: Vec<SourceContext>, comparison_type: ComparisonType) -> Self {
        Self {
            documents,
            comparison_type,
            custom_prompt: None,
        }
    }

    pub fn with_custom_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.custom_prompt = Some(prompt.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentComparison {
    pub comparison: ComparisonResult,
    pub resolution: Resolution,
}

pub struct CompareDocumentsUseCase {
    answer: Arc<AnswerUseCase>,
}

impl CompareDocumentsUseCase {
    pub fn new(answer: Arc<AnswerUseCase>) -> Self {
        Self { answer }
    }

    pub async fn execute(
        &self,
        input: CompareDocumentsInput,
    ) -> Result<DocumentComparison, CompareDocumentsError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: CompareDocumentsInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<DocumentComparison, CompareDocumentsError> {
        let (first, second) = match input.documents.as_slice() {
            [first, second] => (first, second),
            [] | [_] => return Err(CompareDocumentsError::TooFewDocuments),
            docs => return Err(CompareDocumentsError::TooManyDocuments(docs.len())),
        };

        let ty = input.comparison_type;
        info!("Comparing {} and {} ({})", first.source_name, second.source_name, ty);

        let prompt = match &input.custom_prompt {
            Some(custom) if !custom.trim().is_empty() => custom.clone(),
            _ => ty.prompt(
                (&first.source_name, &first.text),
                (&second.source_name, &second.text),
                self.answer.config().budget.comparison_chars,
            ),
        };

        let context = SourceContext::document(
            format!("{} vs {}", first.source_name, second.source_name),
            format!("{}{}{}", first.text, DOCUMENT_SEPARATOR, second.text),
        );
        let answer_input = AnswerInput::new(Question::new(prompt)?)
            .with_history(vec![ConversationTurn::system(ty.system_prompt())])
            .with_context(context);

        let output = self.answer.execute_with_progress(answer_input, progress).await?;

        Ok(DocumentComparison {
            comparison: ComparisonResult::from_response(ty, output.answer.text),
            resolution: output.answer.resolution,
        })
    }
}
