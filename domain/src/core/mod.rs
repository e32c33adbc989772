//! Core domain concepts shared across all subdomains.
//!
//! - [`language::LanguageCode`] - a validated language identifier
//! - [`question::Question`] - one question bound to its source and output languages
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod language;
pub mod question;
pub mod string;
