//! Google Translate adapter.
//!
//! One client implements both [`TranslationService`](lingua_application::TranslationService)
//! and [`LanguageDetector`](lingua_application::LanguageDetector).

pub mod translate;

pub use translate::GoogleTranslateClient;
