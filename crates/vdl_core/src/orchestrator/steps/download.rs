//! Download step - fetches the clip's video and audio streams with the downloader.

use super::{command_failure, run_with_progress};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, DownloadOutput, JobState};
use crate::process::ToolCommand;

/// Runs `<downloader> -i <url>` in the work directory.
///
/// The downloader names its outputs itself, so this step never needs the
/// clip id; the Mux step checks the files it expects.
pub struct DownloadStep;

impl DownloadStep {
    pub fn new() -> Self {
        Self
    }

    fn command(&self, ctx: &Context) -> ToolCommand {
        ToolCommand::new(ctx.settings.tools.downloader_path.as_str())
            .arg("-i")
            .arg(ctx.url.as_str())
            .current_dir(&ctx.work_dir)
    }
}

impl DownloadStep {
    pub const NAME: &'static str = "Download";
}

impl Default for DownloadStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for DownloadStep {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Downloading"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        if ctx.url.trim().is_empty() {
            return Err(StepError::invalid_input("URL cannot be empty"));
        }
        if ctx.settings.tools.downloader_path.trim().is_empty() {
            return Err(StepError::invalid_input("No downloader configured"));
        }
        if !ctx.work_dir.is_dir() {
            return Err(StepError::file_not_found(&ctx.work_dir));
        }
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()> {
        let command = self.command(ctx);
        let marker = ctx.settings.progress.download_marker.as_str();

        let mut run = run_with_progress(ctx, self.name(), &command, marker)?;

        if !run.output.success() {
            return Err(command_failure(ctx, command.program(), &run.output));
        }

        if run.tracker.complete() {
            ctx.report_progress(self.name(), 100);
            ctx.logger.progress(100);
        }
        ctx.logger.success("Download finished");

        state.download = Some(DownloadOutput {
            command: command.to_string(),
            marker_lines: run.marker_lines,
        });

        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &JobState) -> StepResult<()> {
        if state.download.is_none() {
            return Err(StepError::invalid_output("Download results not recorded"));
        }
        Ok(())
    }
}
