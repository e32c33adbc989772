//! Pipeline configuration from TOML (`[pipeline]` section)

use lingua_application::PipelineParams;
use lingua_domain::{ConfigIssue, LanguageCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw pipeline configuration from TOML
///
/// # Example
///
/// ```toml
/// [pipeline]
/// default_output_language = "hi"   # code ("hi") or name ("Hindi")
/// request_timeout_secs = 60        # 0 disables the per-request timeout
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    pub default_output_language: String,
    pub request_timeout_secs: u64,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        Self {
            default_output_language: LanguageCode::ENGLISH.to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl FilePipelineConfig {
    /// Resolve the default output language, falling back to English.
    pub fn parse_default_output_language(&self) -> (LanguageCode, Vec<ConfigIssue>) {
        match LanguageCode::resolve(&self.default_output_language) {
            Ok(code) => (code, vec![]),
            Err(e) => (
                LanguageCode::english(),
                vec![ConfigIssue::warning(
                    "pipeline.default_output_language",
                    format!("{}, falling back to 'en'", e),
                )],
            ),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn to_pipeline_params(&self) -> (PipelineParams, Vec<ConfigIssue>) {
        let (language, mut issues) = self.parse_default_output_language();
        if self.request_timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                "pipeline.request_timeout_secs",
                "0 disables the request timeout; a stalled service will block the request",
            ));
        }
        let params = PipelineParams::default()
            .with_default_output_language(language)
            .with_request_timeout(self.request_timeout());
        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_by_name_or_code() {
        for value in ["Telugu", "te", "TE"] {
            let config = FilePipelineConfig {
                default_output_language: value.to_string(),
                ..Default::default()
            };
            let (code, issues) = config.parse_default_output_language();
            assert_eq!(code.as_str(), "te");
            assert!(issues.is_empty());
        }
    }

    #[test]
    fn test_invalid_language_falls_back() {
        let config = FilePipelineConfig {
            default_output_language: "Klingon!".to_string(),
            ..Default::default()
        };
        let (code, issues) = config.parse_default_output_language();
        assert!(code.is_english());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "pipeline.default_output_language");
    }

    #[test]
    fn test_zero_timeout_disables_with_warning() {
        let config = FilePipelineConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        let (params, issues) = config.to_pipeline_params();
        assert_eq!(params.request_timeout, None);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_default_params() {
        let (params, issues) = FilePipelineConfig::default().to_pipeline_params();
        assert_eq!(params, PipelineParams::default());
        assert!(issues.is_empty());
    }
}
