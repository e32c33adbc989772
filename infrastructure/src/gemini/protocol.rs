//! Wire types for the Gemini `generateContent` endpoint.
//!
//! Only the request side lives here: responses deserialize straight into the
//! domain's tolerant [`GenerationResponse`](lingua_domain::GenerationResponse),
//! whose field names match the wire format.

use lingua_domain::{GenerationRequest, MessageRole};
use serde::{Deserialize, Serialize};

/// `POST models/{model}:generateContent` body
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<TextPart>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextPart {
    pub text: String,
}

impl From<&GenerationRequest> for GenerateContentRequest {
    fn from(request: &GenerationRequest) -> Self {
        let role = match request.role {
            MessageRole::User => "user",
        };
        Self {
            contents: vec![Content {
                role,
                parts: vec![TextPart {
                    text: request.content.clone(),
                }],
            }],
        }
    }
}

/// Error envelope returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = GenerateContentRequest::from(&GenerationRequest::user("Question: 'x'"));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Question: 'x'" }] }]
            })
        );
    }

    #[test]
    fn test_error_envelope() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.error.code, 400);
        assert_eq!(envelope.error.status, "INVALID_ARGUMENT");
    }
}
