//! Session controller: form fields, phase transitions and the conflict probe.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use super::error::WorkflowError;
use super::state::Phase;
use crate::config::Settings;
use crate::fetch::FetchError;
use crate::models::{ClipId, OutputTarget};
use crate::orchestrator::{DownloadStep, PipelineError, RunAction, RunEvent, RunReport, RunRequest};
use crate::validation::{validate_url, ValidationError};

/// Run log lines kept for display.
const MAX_LOG_LINES: usize = 500;

/// Share of the whole run taken by the download step of a Download action.
const DOWNLOAD_SHARE: u32 = 50;

/// Highest run-level value before the worker confirms success.
const RUNNING_CEILING: u32 = 99;

/// Map a step's own 0..=100 onto the whole run.
///
/// Download actions give the first half to the downloader and the rest to
/// the muxer. The result stays at or below 99; only a successful finish
/// shows 100.
fn overall_percent(action: RunAction, step: &str, percent: u32) -> u32 {
    let percent = percent.min(100);
    let (start, span) = match (action, step) {
        (RunAction::Download, DownloadStep::NAME) => (0, DOWNLOAD_SHARE),
        (RunAction::Download, _) => (DOWNLOAD_SHARE, RUNNING_CEILING - DOWNLOAD_SHARE),
        (RunAction::Combine, _) => (0, RUNNING_CEILING),
    };
    start + percent * span / 100
}

/// A clip id lookup the front-end should perform.
///
/// Hand the result back through [`Session::fetch_finished`] together with
/// `generation`; answers for an older generation are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub url: String,
}

/// UI-facing state for one window.
pub struct Session {
    settings: Settings,
    work_dir: PathBuf,
    url: String,
    output_name: String,
    output_dir: Option<PathBuf>,
    phase: Phase,
    generation: u64,
    status: String,
    error: Option<WorkflowError>,
    progress: u32,
    log: VecDeque<String>,
}

impl Session {
    /// Create an idle session.
    ///
    /// The configured work directory is made absolute here so every later
    /// path (temp streams, relative output folders) is unambiguous.
    pub fn new(settings: Settings) -> Self {
        let work_dir = resolve_work_dir(&settings.paths.work_dir);
        let output_dir = settings.paths.output_folder();
        tracing::debug!("Session work directory: {}", work_dir.display());

        Self {
            settings,
            work_dir,
            url: String::new(),
            output_name: String::new(),
            output_dir,
            phase: Phase::Idle,
            generation: 0,
            status: String::new(),
            error: None,
            progress: 0,
            log: VecDeque::new(),
        }
    }

    // ---- accessors ----

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        self.error.as_ref()
    }

    /// Progress of the current step, 0..=100.
    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn log_lines(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    pub fn can_download(&self) -> bool {
        self.phase.can_download()
    }

    pub fn can_combine(&self) -> bool {
        self.phase.can_combine()
    }

    /// The completion dialog is showing.
    pub fn dialog_visible(&self) -> bool {
        matches!(self.phase, Phase::Completed { .. })
    }

    /// Report of the finished run while the dialog is showing.
    pub fn report(&self) -> Option<&RunReport> {
        match &self.phase {
            Phase::Completed { report } => Some(report),
            _ => None,
        }
    }

    // ---- transitions ----

    /// URL field changed. Returns the lookup to perform when the URL is valid.
    pub fn set_url(&mut self, url: impl Into<String>) -> Option<FetchRequest> {
        if !self.phase.accepts_input() {
            return None;
        }

        self.url = url.into();
        // Any answer still in flight belongs to the old URL.
        self.generation += 1;

        match validate_url(&self.url) {
            Err(e) => {
                self.phase = Phase::Idle;
                self.status.clear();
                self.error = Some(e.into());
                None
            }
            Ok(()) => {
                self.phase = Phase::Checking;
                self.status = "Looking up clip...".to_string();
                self.error = None;
                Some(FetchRequest {
                    generation: self.generation,
                    url: self.url.trim().to_string(),
                })
            }
        }
    }

    /// A lookup finished. Returns `false` if the answer was stale and ignored.
    pub fn fetch_finished(&mut self, generation: u64, result: Result<ClipId, FetchError>) -> bool {
        if generation != self.generation || !matches!(self.phase, Phase::Checking) {
            tracing::debug!(
                "Dropping stale lookup result (generation {}, current {})",
                generation,
                self.generation
            );
            return false;
        }

        match result {
            Ok(clip) => {
                self.error = None;
                self.probe(clip);
            }
            Err(e) => {
                tracing::warn!("Clip lookup failed: {}", e);
                self.phase = Phase::Idle;
                self.status.clear();
                self.error = Some(e.into());
            }
        }
        true
    }

    /// Output name field changed.
    pub fn set_output_name(&mut self, name: impl Into<String>) {
        if !self.phase.accepts_input() {
            return;
        }
        self.output_name = name.into();
        if matches!(self.error, Some(WorkflowError::Validation(ValidationError::EmptyOutputName))) {
            self.error = None;
        }
        self.reprobe();
    }

    /// Output directory picked (or cleared).
    pub fn set_output_dir(&mut self, dir: Option<PathBuf>) {
        if !self.phase.accepts_input() {
            return;
        }
        self.output_dir = dir.filter(|d| !d.as_os_str().is_empty());
        self.reprobe();
    }

    /// Download button pressed. Returns the worker request on success.
    pub fn start_download(&mut self) -> Result<RunRequest, WorkflowError> {
        self.start(RunAction::Download)
    }

    /// Combine button pressed. Returns the worker request on success.
    pub fn start_combine(&mut self) -> Result<RunRequest, WorkflowError> {
        self.start(RunAction::Combine)
    }

    fn start(&mut self, action: RunAction) -> Result<RunRequest, WorkflowError> {
        let clip = match (&self.phase, action) {
            (Phase::Ready { clip }, RunAction::Download)
            | (Phase::Conflict { clip }, RunAction::Combine) => clip.clone(),
            (phase, action) => {
                return Err(WorkflowError::ActionUnavailable {
                    action,
                    phase: phase.name(),
                })
            }
        };

        let output = match OutputTarget::new(&self.output_name, self.output_dir.as_deref()) {
            Ok(output) => output,
            Err(e) => {
                self.error = Some(e.clone().into());
                return Err(e.into());
            }
        };

        tracing::info!("Starting {} for clip {}", action, clip);
        self.phase = Phase::Running {
            action,
            clip: clip.clone(),
        };
        self.progress = 0;
        self.error = None;
        self.log.clear();
        self.status = match action {
            RunAction::Download => "Starting download...".to_string(),
            RunAction::Combine => "Starting combine...".to_string(),
        };

        Ok(RunRequest {
            action,
            url: self.url.trim().to_string(),
            clip,
            output,
        })
    }

    /// Apply an event from the worker. Returns `true` when the run just completed.
    pub fn apply_event(&mut self, event: RunEvent) -> bool {
        if !self.phase.is_running() {
            return false;
        }

        match event {
            RunEvent::Status(status) => {
                self.status = status;
                false
            }
            RunEvent::Progress { step, percent } => {
                if let Phase::Running { action, .. } = &self.phase {
                    let overall = overall_percent(*action, &step, percent);
                    self.progress = self.progress.max(overall);
                }
                false
            }
            RunEvent::Log(line) => {
                if self.log.len() >= MAX_LOG_LINES {
                    self.log.pop_front();
                }
                self.log.push_back(line);
                false
            }
            RunEvent::Finished(result) => self.run_finished(result),
        }
    }

    /// The worker finished. Returns `true` when the session moved to Completed.
    pub fn run_finished(&mut self, result: Result<RunReport, PipelineError>) -> bool {
        let clip = match &self.phase {
            Phase::Running { clip, .. } => clip.clone(),
            _ => return false,
        };

        match result {
            Ok(report) => {
                self.progress = 100;
                self.status = match report.cleanup_warning() {
                    Some(warning) => format!("Merge complete ({})", warning),
                    None => "Merge complete".to_string(),
                };
                self.phase = Phase::Completed { report };
                true
            }
            Err(e) => {
                tracing::warn!("Run failed: {}", e);
                self.status.clear();
                self.error = Some(e.into());
                self.probe(clip);
                false
            }
        }
    }

    /// "Start over" in the completion dialog.
    pub fn restart(&mut self) {
        if !self.dialog_visible() {
            return;
        }
        self.generation += 1;
        self.url.clear();
        self.output_name.clear();
        self.output_dir = None;
        self.status.clear();
        self.error = None;
        self.progress = 0;
        self.log.clear();
        self.phase = Phase::Idle;
    }

    // ---- conflict probe ----

    fn reprobe(&mut self) {
        let clip = match &self.phase {
            Phase::Ready { clip } | Phase::Conflict { clip } => clip.clone(),
            _ => return,
        };
        self.probe(clip);
    }

    /// Move to Ready or Conflict depending on what already exists on disk.
    fn probe(&mut self, clip: ClipId) {
        let conflict = self.conflict(&clip);
        self.status = match &conflict {
            // The muxer never overwrites, so Combine cannot succeed here.
            Some(Conflict::OutputExists(path)) => format!(
                "{} already exists; choose another output name",
                path.display()
            ),
            Some(Conflict::StreamsPresent) => {
                "The video already exists. Use Combine to merge it.".to_string()
            }
            None => format!("Clip {} ready to download", clip),
        };
        self.phase = match conflict {
            Some(_) => Phase::Conflict { clip },
            None => Phase::Ready { clip },
        };
    }

    /// What already on disk blocks a fresh download. The output file wins.
    fn conflict(&self, clip: &ClipId) -> Option<Conflict> {
        let output = OutputTarget::new(&self.output_name, self.output_dir.as_deref())
            .ok()
            .map(|target| target.resolve(&self.work_dir))
            .filter(|path| path.exists());
        if let Some(path) = output {
            return Some(Conflict::OutputExists(path));
        }
        clip.media_pair(&self.work_dir)
            .video
            .exists()
            .then_some(Conflict::StreamsPresent)
    }
}

enum Conflict {
    OutputExists(PathBuf),
    StreamsPresent,
}

fn resolve_work_dir(configured: &str) -> PathBuf {
    let configured = if configured.trim().is_empty() {
        "."
    } else {
        configured
    };
    std::path::absolute(configured).unwrap_or_else(|_| PathBuf::from(configured))
}
