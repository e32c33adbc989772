//! Google Gemini adapter for the [`AnswerModel`](lingua_application::AnswerModel) port.

pub mod model;
pub mod protocol;

pub use model::{GeminiAnswerModel, GeminiConfig};
