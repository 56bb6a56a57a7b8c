//! Pipeline orchestrator for download and combine runs.
//!
//! # Architecture
//!
//! ```text
//! RunAction::Download          RunAction::Combine
//!     ├── Step: Download           └── Step: Mux
//!     └── Step: Mux
//! ```
//!
//! A run executes on its own worker thread ([`spawn_run`]) and reports
//! back exclusively through [`RunEvent`]s, ending with exactly one
//! [`RunEvent::Finished`].

mod errors;
mod pipeline;
mod step;
pub mod steps;
mod types;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{Pipeline, PipelineRunResult};
pub use step::PipelineStep;
pub use steps::{DownloadStep, MuxStep};
pub use types::{
    Context, DownloadOutput, EventSink, JobState, MuxOutput, RunAction, RunEvent, RunReport,
    RunRequest,
};

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::Settings;
use crate::logging::{LogConfig, RunLoggerBuilder};

/// Steps for `action`, in order.
pub fn create_pipeline(action: RunAction) -> Pipeline {
    match action {
        RunAction::Download => Pipeline::new()
            .with_step(DownloadStep::new())
            .with_step(MuxStep::new()),
        RunAction::Combine => Pipeline::new().with_step(MuxStep::new()),
    }
}

/// Run `request` to completion on the calling thread.
///
/// `work_dir` should be absolute. Events (status, progress, log lines) go
/// to `sink`; the final result is returned rather than emitted.
pub fn run_action(
    request: &RunRequest,
    settings: &Settings,
    work_dir: &Path,
    sink: EventSink,
) -> PipelineResult<RunReport> {
    let log_sink = Arc::clone(&sink);
    let logs_dir = PathBuf::from(&settings.paths.logs_folder);
    let run_name = format!("{}_{}", request.action.label(), request.clip);

    let logger = RunLoggerBuilder::new(run_name.as_str(), logs_dir.as_path())
        .config(LogConfig::from(&settings.logging))
        .gui_callback(Box::new(move |line| log_sink(RunEvent::Log(line.to_string()))))
        .build()
        .map_err(|e| {
            PipelineError::setup_failed(format!(
                "cannot create run log in {}: {}",
                logs_dir.display(),
                e
            ))
        })?;
    let logger = Arc::new(logger);

    let ctx = Context::new(settings.clone(), request, work_dir.to_path_buf(), Arc::clone(&logger))
        .with_event_sink(sink);
    let mut state = JobState::new(&ctx.run_name);

    tracing::info!(
        "Starting {} of clip {} into {}",
        request.action,
        request.clip,
        ctx.output_path.display()
    );
    ctx.logger.info(&format!("Clip: {}", ctx.clip));
    ctx.logger.info(&format!("Work directory: {}", ctx.work_dir.display()));

    let result = create_pipeline(request.action).run(&ctx, &mut state);
    logger.flush();

    match result {
        Ok(run) => {
            ctx.report_status("Merge complete");
            tracing::info!("Run {} finished", ctx.run_name);
            for warning in &state.warnings {
                tracing::warn!("Run {}: {}", ctx.run_name, warning);
            }
            Ok(RunReport {
                action: request.action,
                clip: ctx.clip.clone(),
                output_path: ctx.output_path.clone(),
                steps_completed: run.steps_completed,
                warnings: state.warnings,
                log_path: logger.log_path().to_path_buf(),
            })
        }
        Err(e) => {
            tracing::error!("Run {} failed: {}", ctx.run_name, e);
            Err(e)
        }
    }
}

/// Start `request` on a new worker thread.
///
/// The worker emits progress through `sink` and finishes with exactly one
/// [`RunEvent::Finished`]. Fails only if the thread cannot be spawned.
pub fn spawn_run(
    request: RunRequest,
    settings: Settings,
    work_dir: PathBuf,
    sink: EventSink,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("vdl-{}", request.action.label()))
        .spawn(move || {
            let result = run_action(&request, &settings, &work_dir, Arc::clone(&sink));
            sink(RunEvent::Finished(result));
        })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_support::{test_request, write_script, EventLog, CLIP};
    use std::fs;
    use tempfile::tempdir;

    const DOWNLOADER: &str =
        "echo 'Downloading video'\n: > \"${PWD}/abc123-video.mp4\"\necho 'Downloading audio'\n: > \"${PWD}/abc123-audio.mp4\"";
    const MUXER: &str = "for last; do :; done\necho progress\n: > \"$last\"";

    fn settings(dir: &Path) -> Settings {
        let mut settings = Settings::default();
        settings.tools.downloader_path = write_script(dir, "dl.sh", DOWNLOADER)
            .to_string_lossy()
            .into_owned();
        settings.tools.muxer_path = write_script(dir, "mux.sh", MUXER)
            .to_string_lossy()
            .into_owned();
        settings.paths.logs_folder = dir.join("logs").to_string_lossy().into_owned();
        settings
    }

    #[test]
    fn pipelines_per_action() {
        assert_eq!(
            create_pipeline(RunAction::Download).step_names(),
            vec!["Download", "Mux"]
        );
        assert_eq!(create_pipeline(RunAction::Combine).step_names(), vec!["Mux"]);
    }

    #[test]
    fn download_then_mux_end_to_end() {
        let dir = tempdir().unwrap();
        let work = dir.path().join("work");
        fs::create_dir(&work).unwrap();
        let events = EventLog::default();

        let report = run_action(
            &test_request(RunAction::Download),
            &settings(dir.path()),
            &work,
            events.sink(),
        )
        .unwrap();

        assert_eq!(report.steps_completed, vec!["Download", "Mux"]);
        assert_eq!(report.output_path, work.join("merged.mp4"));
        assert!(report.output_path.is_file());
        assert!(report.cleanup_warning().is_none());
        assert!(!work.join(format!("{CLIP}-video.mp4")).exists());
        assert!(report.log_path.is_file());

        let log_lines = events
            .snapshot()
            .iter()
            .filter(|e| matches!(e, RunEvent::Log(_)))
            .count();
        assert!(log_lines > 0);
    }

    #[test]
    fn spawned_run_finishes_exactly_once() {
        let dir = tempdir().unwrap();
        let work = dir.path().to_path_buf();
        let events = EventLog::default();

        fs::write(work.join(format!("{CLIP}-video.mp4")), b"v").unwrap();
        fs::write(work.join(format!("{CLIP}-audio.mp4")), b"a").unwrap();

        let handle = spawn_run(
            test_request(RunAction::Combine),
            settings(dir.path()),
            work.clone(),
            events.sink(),
        )
        .unwrap();
        handle.join().unwrap();

        assert_eq!(events.finished_count(), 1);
        assert_eq!(
            events.progress_for("Mux").iter().filter(|p| **p == 100).count(),
            1
        );
        match events.snapshot().last() {
            Some(RunEvent::Finished(Ok(report))) => {
                assert_eq!(report.action, RunAction::Combine)
            }
            other => panic!("expected successful finish, got {other:?}"),
        }
    }

    #[test]
    fn failed_download_skips_mux() {
        let dir = tempdir().unwrap();
        let mut settings = settings(dir.path());
        settings.tools.downloader_path = write_script(dir.path(), "bad.sh", "echo gone >&2\nexit 4")
            .to_string_lossy()
            .into_owned();
        let events = EventLog::default();

        let err = run_action(
            &test_request(RunAction::Download),
            &settings,
            dir.path(),
            events.sink(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::StepFailed { ref step_name, .. } if step_name == "Download"
        ));
        assert!(events.progress_for("Mux").is_empty());
    }

    #[test]
    fn unwritable_log_dir_is_setup_failure() {
        let dir = tempdir().unwrap();
        let mut settings = settings(dir.path());
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        settings.paths.logs_folder = blocker.join("logs").to_string_lossy().into_owned();

        let err = run_action(
            &test_request(RunAction::Combine),
            &settings,
            dir.path(),
            EventLog::default().sink(),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::SetupFailed { .. }));
    }
}
