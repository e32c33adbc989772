//! Infrastructure layer for lingua-qa
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod detection;
pub mod gemini;
pub mod google;
pub mod logging;
pub mod services;
pub mod wikipedia;

// Re-export commonly used types
pub use config::{
    ConfigLoader, DetectionProvider, FileConfig, FileGenerationConfig, FileLoggingConfig,
    FileOutputConfig, FilePipelineConfig, FileReplConfig, FileRetrievalConfig,
    FileTranslationConfig, RetrievalProvider,
};
pub use detection::ScriptLanguageDetector;
pub use gemini::{GeminiAnswerModel, GeminiConfig};
pub use google::GoogleTranslateClient;
pub use logging::JsonlConversationLogger;
pub use services::{AdapterError, PipelineServices};
pub use wikipedia::{WikipediaConfig, WikipediaKnowledgeSource};
