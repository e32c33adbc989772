//! Answer model port
//!
//! Defines the interface for invoking an external generative model.

use async_trait::async_trait;
use lingua_domain::{FallbackReason, GenerationRequest, GenerationResponse};
use thiserror::Error;

/// Errors that can occur while calling the generative model
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Model endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl GenerationError {
    /// Which placeholder answer this failure degrades to.
    ///
    /// A body that cannot be decoded is treated like an empty response;
    /// everything else is a transport failure.
    pub fn fallback_reason(&self) -> FallbackReason {
        match self {
            GenerationError::Decode(_) => FallbackReason::EmptyResponse,
            _ => FallbackReason::Transport,
        }
    }
}

/// Gateway to a generative answer model
///
/// Implementations (adapters) live in the infrastructure layer. The response
/// is returned as-is; interpreting missing candidates/content/parts is the
/// application's job.
#[async_trait]
pub trait AnswerModel: Send + Sync {
    /// Send a single-turn request and return the raw response
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GenerationError>;

    /// Model identifier for logging
    fn name(&self) -> &str;
}
