//! Retrieval configuration from TOML (`[retrieval]` section)

use lingua_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Which knowledge source to wire in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetrievalProvider {
    #[default]
    Wikipedia,
    /// Retrieval disabled; every prompt is general-knowledge only
    None,
}

/// Raw retrieval configuration from TOML
///
/// ```toml
/// [retrieval]
/// provider = "wikipedia"   # "wikipedia" or "none"
/// base_url = "https://en.wikipedia.org/w/api.php"
/// sentences = 3
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    pub provider: String,
    pub base_url: String,
    /// Number of leading sentences of the article extract
    pub sentences: u32,
    pub timeout_secs: u64,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            provider: "wikipedia".to_string(),
            base_url: "https://en.wikipedia.org/w/api.php".to_string(),
            sentences: 3,
            timeout_secs: 10,
        }
    }
}

impl FileRetrievalConfig {
    pub fn parse_provider(&self) -> (RetrievalProvider, Vec<ConfigIssue>) {
        match self.provider.trim().to_lowercase().as_str() {
            "wikipedia" | "wiki" => (RetrievalProvider::Wikipedia, vec![]),
            "none" | "off" | "disabled" => (RetrievalProvider::None, vec![]),
            _ => (
                RetrievalProvider::default(),
                vec![ConfigIssue::warning(
                    "retrieval.provider",
                    format!(
                        "unknown value '{}' (expected 'wikipedia' or 'none'), falling back to 'wikipedia'",
                        self.provider
                    ),
                )],
            ),
        }
    }
}
