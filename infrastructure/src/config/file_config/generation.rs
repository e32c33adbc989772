//! Generation configuration from TOML (`[generation]` section)

use serde::{Deserialize, Serialize};

/// Raw generative model configuration from TOML
///
/// # Example
///
/// ```toml
/// [generation]
/// model = "gemini-2.0-flash"
/// base_url = "https://generativelanguage.googleapis.com/v1beta"
/// api_key_env = "GOOGLE_API_KEY"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    pub model: String,
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead)
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl FileGenerationConfig {
    /// The API key: `api_key` if set, else the `api_key_env` variable.
    ///
    /// Blank values count as unset.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_key_wins() {
        let config = FileGenerationConfig {
            api_key: Some("direct".to_string()),
            api_key_env: "LINGUA_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("direct"));
    }

    #[test]
    fn test_missing_key() {
        let config = FileGenerationConfig {
            api_key: Some("   ".to_string()),
            api_key_env: "LINGUA_TEST_UNSET_KEY_VAR".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), None);
    }
}
