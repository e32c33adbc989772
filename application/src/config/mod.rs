//! Application-level configuration.
//!
//! - [`PipelineParams`] - per-request control (timeout, default output language)

pub mod pipeline_params;

pub use pipeline_params::PipelineParams;
