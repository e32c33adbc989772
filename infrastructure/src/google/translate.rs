//! Google Translate public endpoint (`translate_a/single`, `client=gtx`).
//!
//! # Response shape
//!
//! The endpoint answers with positional nested arrays:
//!
//! ```text
//! [
//!   [["Hello ", "Hola ", null, null, 10], ["world", "mundo", ...]],  // 0: segments
//!   null,
//!   "es",                                                           // 2: source language
//!   ...
//! ]
//! ```
//!
//! The translation is the concatenation of every segment's first element.
//! With `sl=auto`, index 2 carries the detected source language, which is
//! what [`LanguageDetector`] uses.

use async_trait::async_trait;
use lingua_application::ports::language_detector::{DetectionError, LanguageDetector};
use lingua_application::ports::translation_service::{TranslationError, TranslationService};
use lingua_domain::LanguageCode;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("lingua-qa/", env!("CARGO_PKG_VERSION"));

/// Both the translation service and the auto-detecting language detector
pub struct GoogleTranslateClient {
    client: Client,
    base_url: String,
}

impl GoogleTranslateClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TranslationError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/translate_a/single", self.base_url.trim_end_matches('/'))
    }

    /// Send one request; `from` is a wire code or `"auto"`.
    async fn request(&self, text: &str, from: &str, to: &str) -> Result<Value, TranslationError> {
        debug!("Google translate {} -> {} ({} chars)", from, to, text.chars().count());

        // The text goes in the form body; long answers would overflow a URL.
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("client", "gtx"), ("sl", from), ("tl", to), ("dt", "t")])
            .form(&[("q", text)])
            .send()
            .await
            .map_err(|e| TranslationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))
    }
}

/// Language code as the endpoint expects it.
///
/// Region subtags are uppercased (`zh-tw` → `zh-TW`) and bare Chinese means
/// Simplified (`zh` → `zh-CN`).
pub(crate) fn wire_code(code: &LanguageCode) -> String {
    let mut parts = code.as_str().split('-');
    let primary = parts.next().unwrap_or_default();
    let rest: Vec<String> = parts.map(|p| p.to_ascii_uppercase()).collect();

    if rest.is_empty() {
        return match primary {
            "zh" => "zh-CN".to_string(),
            other => other.to_string(),
        };
    }
    format!("{}-{}", primary, rest.join("-"))
}

/// Concatenate the translated segments at index 0
pub(crate) fn parse_translation(body: &Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::MalformedResponse("missing segment list".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        return Err(TranslationError::EmptyResult);
    }
    Ok(text)
}

/// Read the detected source language at index 2
pub(crate) fn parse_detected_language(body: &Value) -> Result<LanguageCode, DetectionError> {
    let raw = body
        .get(2)
        .and_then(Value::as_str)
        .ok_or_else(|| DetectionError::Service("response has no detected language".to_string()))?;

    if raw.eq_ignore_ascii_case("und") {
        return Err(DetectionError::Undetectable(raw.to_string()));
    }
    let code = LanguageCode::new(raw).map_err(|e| DetectionError::Service(e.to_string()))?;
    // Simplified Chinese is `zh` in the output-language catalogue
    if code.as_str() == "zh-cn" {
        return LanguageCode::new("zh").map_err(|e| DetectionError::Service(e.to_string()));
    }
    Ok(code)
}

#[async_trait]
impl TranslationService for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        from: &LanguageCode,
        to: &LanguageCode,
    ) -> Result<String, TranslationError> {
        let body = self.request(text, &wire_code(from), &wire_code(to)).await?;
        parse_translation(&body)
    }

    fn name(&self) -> &str {
        "google-translate"
    }
}

#[async_trait]
impl LanguageDetector for GoogleTranslateClient {
    async fn detect(&self, text: &str) -> Result<LanguageCode, DetectionError> {
        if text.trim().is_empty() {
            return Err(DetectionError::EmptyText);
        }
        let body = self
            .request(text, "auto", LanguageCode::ENGLISH)
            .await
            .map_err(|e| DetectionError::Service(e.to_string()))?;
        parse_detected_language(&body)
    }

    fn name(&self) -> &str {
        "google-auto-detect"
    }
}
