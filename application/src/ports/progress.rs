//! Progress notification port
//!
//! Defines the interface for reporting stage transitions while a question
//! moves through the pipeline.

use lingua_domain::{LanguageCode, PipelineStage};

/// Callback for progress updates during a pipeline request
///
/// Implementations live in the presentation layer (spinners, plain text, etc.)
pub trait PipelineProgress: Send + Sync {
    /// Called when a working stage starts
    fn on_stage_start(&self, stage: PipelineStage);

    /// Called when the request reaches `Done` or `Failed`
    fn on_finished(&self, outcome: PipelineStage);

    /// Called once the source language is known
    fn on_language_detected(&self, _language: &LanguageCode) {}

    /// Called when a non-fatal stage degraded (translation of the query,
    /// retrieval, or generation fell back)
    fn on_degraded(&self, _stage: PipelineStage, _detail: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl PipelineProgress for NoProgress {
    fn on_stage_start(&self, _stage: PipelineStage) {}
    fn on_finished(&self, _outcome: PipelineStage) {}
}
