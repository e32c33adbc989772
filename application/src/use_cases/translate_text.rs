//! Translate Text use case.
//!
//! Wraps a [`TranslationService`] with the identity guarantee: translating
//! between codes of the same language (see [`LanguageCode::same_language`])
//! returns the input unchanged without calling the service.

use crate::ports::translation_service::{TranslationError, TranslationService};
use lingua_domain::LanguageCode;
use lingua_domain::core::string::preview;
use std::sync::Arc;
use tracing::debug;

/// Bidirectional translator used by the pipeline
#[derive(Clone)]
pub struct TextTranslator {
    service: Arc<dyn TranslationService>,
}

impl TextTranslator {
    pub fn new(service: Arc<dyn TranslationService>) -> Self {
        Self { service }
    }

    /// Translate `text` from `from` to `to`.
    ///
    /// Never returns the untranslated source on failure, and rejects a blank
    /// result for non-blank input.
    pub async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> Result<String, TranslationError> {
        if from.same_language(to) {
            return Ok(text.to_string());
        }

        debug!(
            "Translating {} -> {} via {}: {}",
            from,
            to,
            self.service.name(),
            preview(text, 80)
        );

        let translated = self.service.translate(text, from, to).await?;
        if translated.trim().is_empty() && !text.trim().is_empty() {
            return Err(TranslationError::EmptyResult);
        }
        Ok(translated)
    }
}
