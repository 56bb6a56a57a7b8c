//! Mux step - merges the downloaded streams into the output file.

use std::fs;

use super::{command_failure, run_with_progress};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, JobState, MuxOutput};
use crate::process::ToolCommand;

/// Runs `<muxer> -nostdin -i <video> -i <audio> -c copy <output>`.
///
/// Temporary streams are removed only after the muxer exited 0 and the
/// output file exists. A failed removal is recorded as a warning.
pub struct MuxStep;

impl MuxStep {
    pub const NAME: &'static str = "Mux";

    pub fn new() -> Self {
        Self
    }

    fn command(&self, ctx: &Context) -> ToolCommand {
        let pair = ctx.media_pair();
        ToolCommand::new(ctx.settings.tools.muxer_path.as_str())
            .arg("-nostdin")
            .arg("-i")
            .arg(pair.video)
            .arg("-i")
            .arg(pair.audio)
            .arg("-c")
            .arg("copy")
            .arg(&ctx.output_path)
            .current_dir(&ctx.work_dir)
    }

    /// Remove both temp streams. Returns whether both are gone.
    fn remove_temps(&self, ctx: &Context, state: &mut JobState) -> bool {
        let pair = ctx.media_pair();
        let mut all_removed = true;

        for path in [&pair.video, &pair.audio] {
            match fs::remove_file(path) {
                Ok(()) => ctx.logger.debug(&format!("Removed {}", path.display())),
                Err(e) => {
                    let warning = StepError::cleanup_failed(path, e);
                    ctx.logger.warn(&warning.to_string());
                    tracing::warn!("{}", warning);
                    state.warnings.push(warning);
                    all_removed = false;
                }
            }
        }

        all_removed
    }
}

impl Default for MuxStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for MuxStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Combining"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if ctx.settings.tools.muxer_path.trim().is_empty() {
            return Err(StepError::invalid_input("No muxer configured"));
        }

        let pair = ctx.media_pair();
        if let Some(missing) = pair.first_missing() {
            return Err(StepError::file_not_found(missing));
        }

        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()> {
        if let Some(parent) = ctx.output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StepError::io_error("creating output directory", e))?;
        }
        ctx.logger
            .info(&format!("Output: {}", ctx.output_path.display()));

        let command = self.command(ctx);
        let marker = ctx.settings.progress.mux_marker.as_str();
        let mut run = run_with_progress(ctx, self.name(), &command, marker)?;

        if !run.output.success() {
            return Err(command_failure(ctx, command.program(), &run.output));
        }

        if !ctx.output_path.is_file() {
            return Err(StepError::invalid_output(format!(
                "{} exited 0 but {} was not created",
                command.program(),
                ctx.output_path.display()
            )));
        }

        let temps_removed = self.remove_temps(ctx, state);

        if run.tracker.complete() {
            ctx.report_progress(self.name(), 100);
            ctx.logger.progress(100);
        }
        ctx.logger.success(&format!(
            "Merged to: {}",
            ctx.output_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
        ));

        state.mux = Some(MuxOutput {
            output_path: ctx.output_path.clone(),
            command: command.to_string(),
            temps_removed,
        });

        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        let mux = state
            .mux
            .as_ref()
            .ok_or_else(|| StepError::invalid_output("Mux results not recorded"))?;

        if !mux.output_path.exists() {
            return Err(StepError::invalid_output(format!(
                "Output file not created: {}",
                mux.output_path.display()
            )));
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::test_support::{test_context, write_script, EventLog};
    use std::path::Path;
    use tempfile::tempdir;

    /// Writes the last argument (the output path) like ffmpeg would.
    const MUX_OK: &str = "for last; do :; done\necho 'progress=continue'\necho 'progress=end'\n: > \"$last\"";

    fn settings_with(script: &Path) -> Settings {
        let mut settings = Settings::default();
        settings.tools.muxer_path = script.to_string_lossy().into_owned();
        settings
    }

    fn write_temps(ctx: &Context) {
        let pair = ctx.media_pair();
        fs::write(&pair.video, b"video").unwrap();
        fs::write(&pair.audio, b"audio").unwrap();
    }

    #[test]
    fn builds_copy_command() {
        let dir = tempdir().unwrap();
        let events = EventLog::default();
        let ctx = test_context(dir.path(), Settings::default(), &events);

        let rendered = MuxStep::new().command(&ctx).to_string();
        assert!(rendered.contains("-nostdin -i"));
        assert!(rendered.contains("abc123-video.mp4 -i"));
        assert!(rendered.contains("abc123-audio.mp4 -c copy"));
        assert!(rendered.ends_with("merged.mp4"));
        assert!(!rendered.contains(" -y"));
    }

    #[test]
    fn missing_inputs_fail_validation() {
        let dir = tempdir().unwrap();
        let events = EventLog::default();
        let ctx = test_context(dir.path(), Settings::default(), &events);

        let err = MuxStep::new().validate_input(&ctx).unwrap_err();
        assert!(matches!(err, StepError::FileNotFound { ref path } if path.ends_with("abc123-video.mp4")));
    }

    #[test]
    fn success_removes_temps_and_completes() {
        let dir = tempdir().unwrap();
        let script = write_script(dir.path(), "mux.sh", MUX_OK);
        let events = EventLog::default();
        let ctx = test_context(dir.path(), settings_with(&script), &events);
        write_temps(&ctx);

        let step = MuxStep::new();
        step.validate_input(&ctx).unwrap();
        let mut state = JobState::new("run");
        step.execute(&ctx, &mut state).unwrap();
        step.validate_output(&ctx, &state).unwrap();

        let pair = ctx.media_pair();
        assert!(!pair.video.exists());
        assert!(!pair.audio.exists());
        assert!(ctx.output_path.is_file());
        assert!(state.mux.as_ref().unwrap().temps_removed);
        assert!(state.warnings.is_empty());
        assert_eq!(events.progress_for("Mux"), vec![1, 2, 100]);
    }

    #[test]
    fn failure_keeps_temps_and_reports_stderr() {
        let dir = tempdir().unwrap();
        let script = write_script(
            dir.path(),
            "mux.sh",
            "echo 'Invalid data found when processing input' >&2\nexit 1",
        );
        let events = EventLog::default();
        let ctx = test_context(dir.path(), settings_with(&script), &events);
        write_temps(&ctx);

        let err = MuxStep::new()
            .execute(&ctx, &mut JobState::new("run"))
            .unwrap_err();

        assert!(matches!(err, StepError::CommandFailed { exit_code: Some(1), .. }));
        assert!(err.to_string().contains("Invalid data found"));
        assert!(ctx.media_pair().both_exist());
        assert!(!events.progress_for("Mux").contains(&100));
    }

    #[test]
    fn exit_zero_without_output_is_invalid() {
        let dir = tempdir().unwrap();
        let script = write_script(dir.path(), "mux.sh", "exit 0");
        let events = EventLog::default();
        let ctx = test_context(dir.path(), settings_with(&script), &events);
        write_temps(&ctx);

        let err = MuxStep::new()
            .execute(&ctx, &mut JobState::new("run"))
            .unwrap_err();
        assert!(matches!(err, StepError::InvalidOutput(_)));
        assert!(ctx.media_pair().both_exist());
    }

    #[test]
    fn cleanup_failure_is_a_warning() {
        let dir = tempdir().unwrap();
        // Removes the audio stream itself so our own removal fails.
        let script = write_script(
            dir.path(),
            "mux.sh",
            &format!("rm -f \"$5\"\n{}", MUX_OK),
        );
        let events = EventLog::default();
        let ctx = test_context(dir.path(), settings_with(&script), &events);
        write_temps(&ctx);

        let mut state = JobState::new("run");
        MuxStep::new().execute(&ctx, &mut state).unwrap();

        assert!(!state.mux.as_ref().unwrap().temps_removed);
        assert_eq!(state.warnings.len(), 1);
        assert!(matches!(
            state.warnings[0],
            StepError::CleanupFailed { ref path, .. } if path.ends_with("abc123-audio.mp4")
        ));
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempdir().unwrap();
        let script = write_script(dir.path(), "mux.sh", MUX_OK);
        let events = EventLog::default();
        let mut ctx = test_context(dir.path(), settings_with(&script), &events);
        ctx.output_path = dir.path().join("out").join("nested").join("merged.mp4");
        write_temps(&ctx);

        MuxStep::new()
            .execute(&ctx, &mut JobState::new("run"))
            .unwrap();
        assert!(ctx.output_path.is_file());
    }
}
