//! Application layer for snapstudy
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::OrchestrationConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    progress::{NoProgress, ProgressNotifier},
    provider::{ProviderAdapter, ProviderError, ProviderRequest},
    video_info::{VideoError, VideoInfoSource},
};
pub use use_cases::analyze_document::{AnalyzeDocumentError, AnalyzeDocumentUseCase, DocumentAnalysis};
pub use use_cases::answer::{AnswerError, AnswerInput, AnswerOutput, AnswerUseCase};
pub use use_cases::compare_documents::{
    CompareDocumentsError, CompareDocumentsInput, CompareDocumentsUseCase, DocumentComparison,
};
pub use use_cases::fan_out::{FanOutError, FanOutUseCase};
pub use use_cases::summarize_video::{SummarizeVideoError, SummarizeVideoUseCase};
pub use use_cases::synthesize::{SynthesizeError, SynthesizeUseCase};
