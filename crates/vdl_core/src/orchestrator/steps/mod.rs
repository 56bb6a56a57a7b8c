//! Pipeline step implementations.
//!
//! Both steps shell out to an external tool through [`run_tool`], feeding
//! stdout into the run logger and a marker-driven [`ProgressTracker`].

mod download;
mod mux;

pub use download::DownloadStep;
pub use mux::MuxStep;

use std::path::Path;

use crate::models::ToolOutput;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::types::Context;
use crate::process::{run_tool, ProgressTracker, ToolCommand};

/// What a finished tool run left behind.
struct ToolRun {
    output: ToolOutput,
    tracker: ProgressTracker,
    marker_lines: usize,
}

/// Short tool name for messages: `/usr/bin/ffmpeg.exe` -> `ffmpeg`.
fn tool_label(program: &str) -> String {
    Path::new(program)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| program.to_string())
}

/// Run `command`, logging its output and reporting marker progress for `step`.
fn run_with_progress(
    ctx: &Context,
    step: &str,
    command: &ToolCommand,
    marker: &str,
) -> StepResult<ToolRun> {
    ctx.logger.command(&command.to_string());

    let mut tracker = ProgressTracker::new(ctx.settings.progress.step_pct);

    let output = run_tool(command, |line| {
        ctx.logger.output_line(line, false);
        if let Some(percent) = tracker.observe(line, marker) {
            ctx.report_progress(step, percent);
            ctx.logger.progress(percent);
        }
    })
    .map_err(|e| StepError::launch(tool_label(command.program()), e))?;

    for line in output.stderr.lines() {
        ctx.logger.output_line(line, true);
    }

    let marker_lines = tracker.markers_seen();
    Ok(ToolRun {
        output,
        tracker,
        marker_lines,
    })
}

/// Build the `CommandFailed` error for a non-zero exit.
///
/// Prefers the tail of stderr; falls back to the last logged output lines.
fn command_failure(ctx: &Context, program: &str, output: &ToolOutput) -> StepError {
    let tool = tool_label(program);
    ctx.logger.show_tail(&tool);

    let keep = (ctx.settings.logging.error_tail as usize).max(1);
    let stderr: Vec<&str> = output
        .stderr
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect();

    let message = if !stderr.is_empty() {
        stderr[stderr.len().saturating_sub(keep)..].join("\n")
    } else {
        let tail = ctx.logger.get_tail();
        if tail.is_empty() {
            format!("{} exited without any output", tool)
        } else {
            format!("{} reported no error output. Last lines:\n{}", tool, tail.join("\n"))
        }
    };

    StepError::command_failed(tool, output.exit_code, message)
}
