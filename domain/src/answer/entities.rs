//! Answer entities

use crate::core::language::LanguageCode;
use serde::{Deserialize, Serialize};

/// Placeholder shown when the model returned nothing usable.
pub const EMPTY_ANSWER_PLACEHOLDER: &str = "Sorry, I could not generate an answer.";

/// Placeholder shown when the model endpoint could not be reached.
pub const TRANSPORT_FAILURE_PLACEHOLDER: &str =
    "An API error occurred while answering the question.";

/// Why an answer is a placeholder instead of generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No candidates, content, parts or text in the response
    EmptyResponse,
    /// Network or HTTP failure talking to the model
    Transport,
}

impl FallbackReason {
    pub fn placeholder(&self) -> &'static str {
        match self {
            FallbackReason::EmptyResponse => EMPTY_ANSWER_PLACEHOLDER,
            FallbackReason::Transport => TRANSPORT_FAILURE_PLACEHOLDER,
        }
    }
}

/// Where the answer text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum AnswerOrigin {
    Generated,
    Fallback(FallbackReason),
}

/// The generator's output before output-language rendering (Entity)
///
/// `source_language` is the language `raw_text` is assumed to be in: the
/// question's language for generated answers, English for placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub raw_text: String,
    pub source_language: LanguageCode,
    pub origin: AnswerOrigin,
}

impl Answer {
    pub fn generated(raw_text: impl Into<String>, source_language: LanguageCode) -> Self {
        Self {
            raw_text: raw_text.into(),
            source_language,
            origin: AnswerOrigin::Generated,
        }
    }

    pub fn fallback(reason: FallbackReason) -> Self {
        Self {
            raw_text: reason.placeholder().to_string(),
            source_language: LanguageCode::english(),
            origin: AnswerOrigin::Fallback(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, AnswerOrigin::Fallback(_))
    }
}

/// The answer rendered in the user's chosen output language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedAnswer {
    pub text: String,
    pub language: LanguageCode,
}
