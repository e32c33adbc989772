//! [`AnswerModel`] adapter for Google's Gemini API.

use super::protocol::{ErrorEnvelope, GenerateContentRequest};
use async_trait::async_trait;
use lingua_application::ports::answer_model::{AnswerModel, GenerationError};
use lingua_domain::{GenerationRequest, GenerationResponse};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Connection settings for [`GeminiAnswerModel`]
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub base_url: String,
    pub model: String,
    /// `None` makes every call fail with [`GenerationError::MissingApiKey`]
    pub api_key: Option<String>,
    /// Name of the variable the key should come from, for error messages
    pub api_key_env: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key: None,
            api_key_env: "GOOGLE_API_KEY".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl GeminiConfig {
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

/// Gemini-backed answer model.
///
/// The key travels in the `x-goog-api-key` header, never in the URL, so
/// transport errors (which include the URL) cannot leak it.
pub struct GeminiAnswerModel {
    config: GeminiConfig,
    client: Client,
}

impl GeminiAnswerModel {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("lingua-qa/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GenerationError::Connection(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn has_api_key(&self) -> bool {
        self.config.api_key.is_some()
    }
}

/// Map an HTTP status and body to the port's result type
pub(crate) fn parse_response(
    status: u16,
    body: &str,
) -> Result<GenerationResponse, GenerationError> {
    if !(200..300).contains(&status) {
        let detail = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| {
                if envelope.error.status.is_empty() {
                    envelope.error.message
                } else {
                    format!("{}: {}", envelope.error.status, envelope.error.message)
                }
            })
            .unwrap_or_else(|_| body.chars().take(200).collect());
        return Err(GenerationError::Status {
            status,
            body: detail,
        });
    }

    serde_json::from_str(body).map_err(|e| GenerationError::Decode(e.to_string()))
}

#[async_trait]
impl AnswerModel for GeminiAnswerModel {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::MissingApiKey(self.config.api_key_env.clone()))?;

        debug!("POST {} ({} prompt chars)", self.config.endpoint(), request.content.len());

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&GenerateContentRequest::from(request))
            .send()
            .await
            .map_err(|e| GenerationError::Connection(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Connection(e.without_url().to_string()))?;

        parse_response(status, &body)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}
