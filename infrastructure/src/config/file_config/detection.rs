//! Detection configuration from TOML (`[detection]` section)

use lingua_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Which language detector to wire in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetectionProvider {
    /// Offline Unicode-script and stopword detector
    #[default]
    Script,
    /// Auto-detection through the translation endpoint
    Google,
}

impl DetectionProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionProvider::Script => "script",
            DetectionProvider::Google => "google",
        }
    }
}

/// Raw detection configuration from TOML
///
/// ```toml
/// [detection]
/// provider = "script"   # "script" or "google"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDetectionConfig {
    pub provider: String,
}

impl Default for FileDetectionConfig {
    fn default() -> Self {
        Self {
            provider: DetectionProvider::Script.as_str().to_string(),
        }
    }
}

impl FileDetectionConfig {
    pub fn parse_provider(&self) -> (DetectionProvider, Vec<ConfigIssue>) {
        match self.provider.trim().to_lowercase().as_str() {
            "script" | "offline" => (DetectionProvider::Script, vec![]),
            "google" => (DetectionProvider::Google, vec![]),
            _ => (
                DetectionProvider::default(),
                vec![ConfigIssue::warning(
                    "detection.provider",
                    format!(
                        "unknown value '{}' (expected 'script' or 'google'), falling back to 'script'",
                        self.provider
                    ),
                )],
            ),
        }
    }
}
