//! Translation service port

use async_trait::async_trait;
use lingua_domain::LanguageCode;
use thiserror::Error;

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    Transport(String),

    #[error("translation service returned HTTP {status}")]
    Status { status: u16 },

    #[error("unexpected translation response: {0}")]
    MalformedResponse(String),

    #[error("translation service returned an empty result")]
    EmptyResult,
}

/// External translation capability.
///
/// The `from == to` identity short-circuit is guaranteed by
/// [`TextTranslator`](crate::use_cases::translate_text::TextTranslator),
/// not by implementations of this trait.
#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> Result<String, TranslationError>;

    /// Service name for logging
    fn name(&self) -> &str;
}
