//! Language detection port

use async_trait::async_trait;
use lingua_domain::LanguageCode;
use thiserror::Error;

/// Errors that can occur during language detection
#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("cannot detect the language of empty text")]
    EmptyText,

    #[error("no supported script found in {0:?}")]
    Undetectable(String),

    #[error("detection service error: {0}")]
    Service(String),
}

/// Classifies the language of a piece of text.
///
/// Must be deterministic for identical input within one process run and
/// free of side effects.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    async fn detect(&self, text: &str) -> Result<LanguageCode, DetectionError>;

    /// Detector name for logging
    fn name(&self) -> &str;
}
