//! Infrastructure layer for snapstudy
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP provider clients, the oEmbed video
//! source, the JSONL conversation logger, local content loading and
//! configuration file loading.

pub mod config;
pub mod context;
pub mod logging;
pub mod providers;
pub mod video;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileContextConfig, FileLoggingConfig,
    FileMockConfig, FileOrchestrationConfig, FileOutputConfig, FileProviderConfig, FileProvidersConfig,
    FileReplConfig,
};
pub use context::{ContentLoadError, ContentLoader, ContentType, KeyInfo, LoadedContent};
pub use logging::JsonlConversationLogger;
pub use providers::{
    HttpProvider, HttpProviderSettings, MockProvider, build_mock_providers, build_providers,
};
pub use video::{OEmbedVideoSource, OfflineVideoSource};
