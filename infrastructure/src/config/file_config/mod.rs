//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod detection;
mod generation;
mod logging;
mod output;
mod pipeline;
mod repl;
mod retrieval;
mod translation;

pub use detection::{DetectionProvider, FileDetectionConfig};
pub use generation::FileGenerationConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use pipeline::FilePipelineConfig;
pub use repl::FileReplConfig;
pub use retrieval::{FileRetrievalConfig, RetrievalProvider};
pub use translation::FileTranslationConfig;

use lingua_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Per-request behavior
    pub pipeline: FilePipelineConfig,
    /// Language detector selection
    pub detection: FileDetectionConfig,
    /// Translation service endpoint
    pub translation: FileTranslationConfig,
    /// Knowledge source selection and endpoint
    pub retrieval: FileRetrievalConfig,
    /// Generative model endpoint and credentials
    pub generation: FileGenerationConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Log sinks
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks:
    /// 1. Provider names and the default output language
    /// 2. Zero adapter timeouts
    /// 3. Empty endpoints and model name
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Parse validation
        issues.extend(self.pipeline.to_pipeline_params().1);
        issues.extend(self.detection.parse_provider().1);
        issues.extend(self.retrieval.parse_provider().1);

        // 2. Adapter timeouts
        for (field, secs) in [
            ("translation.timeout_secs", self.translation.timeout_secs),
            ("retrieval.timeout_secs", self.retrieval.timeout_secs),
            ("generation.timeout_secs", self.generation.timeout_secs),
        ] {
            if secs == 0 {
                issues.push(ConfigIssue::error(field, "timeout must be greater than 0"));
            }
        }

        // 3. Required strings
        for (field, value) in [
            ("translation.base_url", &self.translation.base_url),
            ("retrieval.base_url", &self.retrieval.base_url),
            ("generation.base_url", &self.generation.base_url),
            ("generation.model", &self.generation.model),
        ] {
            if value.trim().is_empty() {
                issues.push(ConfigIssue::error(field, "cannot be empty"));
            }
        }

        if self.retrieval.sentences == 0 {
            issues.push(ConfigIssue::warning(
                "retrieval.sentences",
                "0 requests whole introductions; extracts may be long",
            ));
        }

        issues
    }
}

/// Expand a leading `~` to the home directory.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[pipeline]
default_output_language = "Hindi"
request_timeout_secs = 45

[detection]
provider = "google"

[retrieval]
provider = "none"
sentences = 2

[generation]
model = "gemini-1.5-pro"
api_key_env = "MY_GEMINI_KEY"

[output]
format = "json"
color = false

[repl]
show_progress = false
history_file = "~/.local/share/lingua-qa/history.txt"

[logging]
conversation_log = "/tmp/lingua.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pipeline.parse_default_output_language().0.as_str(), "hi");
        assert_eq!(config.pipeline.request_timeout_secs, 45);
        assert_eq!(config.detection.parse_provider().0, DetectionProvider::Google);
        assert_eq!(config.retrieval.parse_provider().0, RetrievalProvider::None);
        assert_eq!(config.retrieval.sentences, 2);
        assert_eq!(config.generation.model, "gemini-1.5-pro");
        assert_eq!(config.generation.api_key_env, "MY_GEMINI_KEY");
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(
            config.logging.conversation_log_path(),
            Some(PathBuf::from("/tmp/lingua.jsonl"))
        );
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[generation]
model = "gemini-2.5-flash"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generation.model, "gemini-2.5-flash");
        // Defaults should apply
        assert_eq!(config.generation.api_key_env, "GOOGLE_API_KEY");
        assert_eq!(config.retrieval.sentences, 3);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[detection]
provider = "cld3"

[translation]
timeout_secs = 0

[generation]
model = ""
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();

        assert!(fields.contains(&"detection.provider"));
        assert!(fields.contains(&"translation.timeout_secs"));
        assert!(fields.contains(&"generation.model"));
        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 2);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/x.txt"), home.join("x.txt"));
        }
    }
}
