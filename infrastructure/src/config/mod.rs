//! Configuration file loading for snapstudy
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SNAPSTUDY_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./snapstudy.toml` or `./.snapstudy.toml`
//! 4. Global: `~/.config/snapstudy/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileContextConfig, FileLoggingConfig, FileMockConfig,
    FileMockProviderConfig, FileOrchestrationConfig, FileOutputConfig, FileProviderConfig, FileProvidersConfig,
    FileReplConfig, NO_SYNTHESIZER,
};
pub use loader::ConfigLoader;
