//! Question value object

use super::error::DomainError;
use super::language::LanguageCode;
use serde::{Deserialize, Serialize};

/// A question bound to the language it was asked in and the language the
/// answer must be rendered in (Value Object)
///
/// Created once per interaction after language detection and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    text: String,
    source_language: LanguageCode,
    output_language: LanguageCode,
}

impl Question {
    /// Try to create a new question, rejecting empty or whitespace-only text
    ///
    /// The text is kept exactly as received; it is embedded verbatim into the
    /// prompt.
    pub fn new(
        text: impl Into<String>,
        source_language: LanguageCode,
        output_language: LanguageCode,
    ) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::EmptyQuestion);
        }
        Ok(Self {
            text,
            source_language,
            output_language,
        })
    }

    /// Get the question text as received
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_language(&self) -> &LanguageCode {
        &self.source_language
    }

    pub fn output_language(&self) -> &LanguageCode {
        &self.output_language
    }

    /// Whether the question needs translating before English retrieval
    pub fn needs_normalization(&self) -> bool {
        !self.source_language.same_language(&LanguageCode::english())
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> LanguageCode {
        LanguageCode::new(s).unwrap()
    }

    #[test]
    fn test_question_creation_keeps_text_verbatim() {
        let q = Question::new("  ¿Cuál es la capital de Francia? ", code("es"), code("en")).unwrap();
        assert_eq!(q.text(), "  ¿Cuál es la capital de Francia? ");
        assert_eq!(q.source_language().as_str(), "es");
        assert_eq!(q.output_language().as_str(), "en");
    }

    #[test]
    fn test_empty_question_rejected() {
        assert_eq!(
            Question::new("", code("en"), code("en")),
            Err(DomainError::EmptyQuestion)
        );
        assert_eq!(
            Question::new(" \n\t", code("en"), code("en")),
            Err(DomainError::EmptyQuestion)
        );
    }

    #[test]
    fn test_needs_normalization() {
        let es = Question::new("Hola", code("es"), code("en")).unwrap();
        let en = Question::new("Hello", code("en"), code("es")).unwrap();
        assert!(es.needs_normalization());
        assert!(!en.needs_normalization());

        let en_gb = Question::new("Colour?", code("en-GB"), code("en")).unwrap();
        assert!(!en_gb.needs_normalization());
    }
}
