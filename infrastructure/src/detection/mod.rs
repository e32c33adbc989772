//! Offline [`LanguageDetector`](lingua_application::LanguageDetector) implementations.

pub mod script;

pub use script::{ScriptLanguageDetector, classify};
