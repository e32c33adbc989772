//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Invalid language code: {0:?}")]
    InvalidLanguageCode(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}

impl DomainError {
    /// Check if this error was caused by user input rather than configuration
    pub fn is_input_error(&self) -> bool {
        matches!(self, DomainError::EmptyQuestion)
    }
}
