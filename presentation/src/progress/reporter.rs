//! Progress reporting for pipeline requests

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use lingua_application::ports::progress::PipelineProgress;
use lingua_domain::{LanguageCode, PipelineStage};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner that names the current stage
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Stage position as "n/5" for working stages
    fn step_label(stage: PipelineStage) -> String {
        PipelineStage::WORKING
            .iter()
            .position(|s| *s == stage)
            .map(|i| format!("[{}/{}]", i + 1, PipelineStage::WORKING.len()))
            .unwrap_or_default()
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        let mut guard = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        let spinner = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        f(spinner);
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineProgress for ProgressReporter {
    fn on_stage_start(&self, stage: PipelineStage) {
        self.with_spinner(|pb| {
            pb.set_prefix(Self::step_label(stage));
            pb.set_message(format!("{}...", stage.display_name()));
        });
    }

    fn on_language_detected(&self, language: &LanguageCode) {
        self.with_spinner(|pb| {
            pb.println(format!(
                "  {} {}",
                "language:".dimmed(),
                crate::output::console::language_label(language)
            ));
        });
    }

    fn on_degraded(&self, stage: PipelineStage, detail: &str) {
        self.with_spinner(|pb| {
            pb.println(format!(
                "  {} {}: {}",
                "!".yellow(),
                stage.display_name(),
                detail
            ));
        });
    }

    fn on_finished(&self, _outcome: PipelineStage) {
        if let Some(pb) = self
            .spinner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl PipelineProgress for SimpleProgress {
    fn on_stage_start(&self, stage: PipelineStage) {
        eprintln!(
            "{} {} {}",
            "->".cyan(),
            ProgressReporter::step_label(stage),
            stage.display_name().bold()
        );
    }

    fn on_degraded(&self, stage: PipelineStage, detail: &str) {
        eprintln!("   {} {} degraded: {}", "!".yellow(), stage.as_str(), detail);
    }

    fn on_finished(&self, outcome: PipelineStage) {
        match outcome {
            PipelineStage::Done => eprintln!("{} {}", "v".green(), "done".green()),
            _ => eprintln!("{} {}", "x".red(), outcome.display_name().red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_labels() {
        assert_eq!(ProgressReporter::step_label(PipelineStage::Detecting), "[1/5]");
        assert_eq!(ProgressReporter::step_label(PipelineStage::Translating), "[5/5]");
        assert_eq!(ProgressReporter::step_label(PipelineStage::Done), "");
    }

    #[test]
    fn test_reporter_lifecycle_without_terminal() {
        let reporter = ProgressReporter::new();
        reporter.on_stage_start(PipelineStage::Detecting);
        reporter.on_degraded(PipelineStage::RetrievingContext, "no usable context");
        reporter.on_finished(PipelineStage::Done);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
