//! Output format value object

use serde::{Deserialize, Serialize};

/// How a pipeline reply is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Only the translated answer
    #[default]
    Answer,
    /// Answer plus detected language, context and prompt details
    Detailed,
    /// JSON object
    Json,
}
