//! Generative model request and response shapes.
//!
//! The response schema mirrors `{ candidates: [ { content: { parts: [ { text } ] } } ] }`
//! with every level optional, so a partially populated or empty body still
//! deserializes and is judged by [`GenerationResponse::first_text`].

use serde::{Deserialize, Serialize};

/// Role of the single message sent to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

/// A single-turn generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub role: MessageRole,
    pub content: String,
}

impl GenerationRequest {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateContent {
    pub parts: Option<Vec<Part>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Part {
    pub text: Option<String>,
}

impl GenerationResponse {
    /// Build a response with a single candidate holding `text`
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            candidates: Some(vec![Candidate {
                content: Some(CandidateContent {
                    parts: Some(vec![Part {
                        text: Some(text.into()),
                    }]),
                }),
            }]),
        }
    }

    /// The first candidate's first part, trimmed.
    ///
    /// `None` when any level is missing or empty, or the text is blank.
    pub fn first_text(&self) -> Option<&str> {
        let text = self
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .first()?
            .text
            .as_deref()?
            .trim();
        (!text.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text_trims() {
        let response = GenerationResponse::with_text("  Paris is the capital.\n");
        assert_eq!(response.first_text(), Some("Paris is the capital."));
    }

    #[test]
    fn test_tolerates_missing_levels() {
        for body in [
            "{}",
            r#"{"candidates": []}"#,
            r#"{"candidates": [{}]}"#,
            r#"{"candidates": [{"content": {}}]}"#,
            r#"{"candidates": [{"content": {"parts": []}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{}]}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"text": "   "}]}}]}"#,
            r#"{"candidates": null}"#,
        ] {
            let response: GenerationResponse = serde_json::from_str(body).unwrap();
            assert_eq!(response.first_text(), None, "body: {body}");
        }
    }

    #[test]
    fn test_ignores_unknown_fields_and_uses_first_candidate() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}], "role": "model"},
                 "finishReason": "STOP"},
                {"content": {"parts": [{"text": "other"}]}}
            ],
            "usageMetadata": {"totalTokenCount": 12}
        }"#;
        let response: GenerationResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_text(), Some("first"));
    }

    #[test]
    fn test_request_serializes_user_role() {
        let json = serde_json::to_value(GenerationRequest::user("hi")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hi");
    }
}
