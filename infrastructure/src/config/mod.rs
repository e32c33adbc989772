//! Configuration file loading for lingua-qa
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `LINGUA_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./lingua.toml` or `./.lingua.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/lingua-qa/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    DetectionProvider, FileConfig, FileDetectionConfig, FileGenerationConfig, FileLoggingConfig,
    FileOutputConfig, FilePipelineConfig, FileReplConfig, FileRetrievalConfig,
    FileTranslationConfig, RetrievalProvider,
};
pub use loader::ConfigLoader;
