//! Core types for the download/mux pipeline.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::errors::{PipelineError, StepError};
use crate::config::Settings;
use crate::logging::RunLogger;
use crate::models::{ClipId, MediaPair, OutputTarget};

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunAction {
    /// Download both streams, then merge them.
    Download,
    /// Merge streams already present in the work directory.
    Combine,
}

impl RunAction {
    pub fn label(&self) -> &'static str {
        match self {
            RunAction::Download => "download",
            RunAction::Combine => "combine",
        }
    }
}

impl fmt::Display for RunAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a worker needs to perform one action.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub action: RunAction,
    pub url: String,
    pub clip: ClipId,
    pub output: OutputTarget,
}

/// Progress and status updates sent from the worker thread.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// Human-readable status line (e.g. "Downloading...").
    Status(String),
    /// Progress of the current step, 0..=100.
    Progress { step: String, percent: u32 },
    /// A formatted run log line.
    Log(String),
    /// The run is over. Sent exactly once per run.
    Finished(Result<RunReport, PipelineError>),
}

/// Receives [`RunEvent`]s. Must be cheap; called on the worker thread.
pub type EventSink = Arc<dyn Fn(RunEvent) + Send + Sync>;

/// Read-only context passed to pipeline steps.
///
/// Holds the run's inputs, including the clip id, which steps can read but
/// never change. Step results go in [`JobState`].
pub struct Context {
    pub settings: Settings,
    pub run_name: String,
    /// Absolute directory holding the temporary streams.
    pub work_dir: PathBuf,
    pub url: String,
    pub clip: ClipId,
    /// Absolute path of the merged file.
    pub output_path: PathBuf,
    pub logger: Arc<RunLogger>,
    event_sink: Option<EventSink>,
}

impl Context {
    pub fn new(
        settings: Settings,
        request: &RunRequest,
        work_dir: PathBuf,
        logger: Arc<RunLogger>,
    ) -> Self {
        let output_path = request.output.resolve(&work_dir);
        Self {
            settings,
            run_name: format!("{}_{}", request.action.label(), request.clip),
            url: request.url.clone(),
            clip: request.clip.clone(),
            work_dir,
            output_path,
            logger,
            event_sink: None,
        }
    }

    pub fn with_event_sink(mut self, sink: EventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// Temporary streams of this run's clip.
    pub fn media_pair(&self) -> MediaPair {
        self.clip.media_pair(&self.work_dir)
    }

    pub fn emit(&self, event: RunEvent) {
        if let Some(sink) = &self.event_sink {
            sink(event);
        }
    }

    pub fn report_progress(&self, step: &str, percent: u32) {
        self.emit(RunEvent::Progress {
            step: step.to_string(),
            percent,
        });
    }

    pub fn report_status(&self, message: impl Into<String>) {
        self.emit(RunEvent::Status(message.into()));
    }
}

/// Mutable state that accumulates results from pipeline steps.
#[derive(Debug, Clone, Default)]
pub struct JobState {
    pub run_name: String,
    pub started_at: Option<String>,
    pub download: Option<DownloadOutput>,
    pub mux: Option<MuxOutput>,
    /// Non-fatal problems, e.g. temp files that could not be removed.
    pub warnings: Vec<StepError>,
}

impl JobState {
    pub fn new(run_name: impl Into<String>) -> Self {
        Self {
            run_name: run_name.into(),
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }
}

/// Output from the Download step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutput {
    pub command: String,
    /// Number of stdout lines that matched the progress marker.
    pub marker_lines: usize,
}

/// Output from the Mux step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuxOutput {
    pub output_path: PathBuf,
    pub command: String,
    /// Whether both temporary streams were removed.
    pub temps_removed: bool,
}

/// Summary of a successful run, shown in the completion dialog.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub action: RunAction,
    pub clip: ClipId,
    pub output_path: PathBuf,
    pub steps_completed: Vec<String>,
    pub warnings: Vec<StepError>,
    pub log_path: PathBuf,
}

impl RunReport {
    /// First temp-file cleanup problem, if any.
    pub fn cleanup_warning(&self) -> Option<&StepError> {
        self.warnings
            .iter()
            .find(|w| matches!(w, StepError::CleanupFailed { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn action_labels() {
        assert_eq!(RunAction::Download.to_string(), "download");
        assert_eq!(RunAction::Combine.label(), "combine");
    }

    #[test]
    fn report_finds_cleanup_warning() {
        let mut report = RunReport {
            action: RunAction::Combine,
            clip: ClipId::new("abc").unwrap(),
            output_path: PathBuf::from("/out/a.mp4"),
            steps_completed: vec!["Mux".to_string()],
            warnings: Vec::new(),
            log_path: PathBuf::from("/logs/a.log"),
        };
        assert!(report.cleanup_warning().is_none());

        report.warnings.push(StepError::cleanup_failed(
            "/work/abc-video.mp4",
            io::Error::from(io::ErrorKind::PermissionDenied),
        ));
        assert!(report.cleanup_warning().is_some());
    }

    #[test]
    fn job_state_records_start() {
        let state = JobState::new("download_abc");
        assert_eq!(state.run_name, "download_abc");
        assert!(state.started_at.is_some());
        assert!(state.warnings.is_empty());
    }
}
