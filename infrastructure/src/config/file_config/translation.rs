//! Translation configuration from TOML (`[translation]` section)

use serde::{Deserialize, Serialize};

/// Raw translation service configuration from TOML
///
/// ```toml
/// [translation]
/// base_url = "https://translate.googleapis.com"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTranslationConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for FileTranslationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".to_string(),
            timeout_secs: 10,
        }
    }
}
