//! Error types for the download/mux pipeline.
//!
//! Errors chain through layers: Run → Step → Operation → Detail.
//! I/O sources are held in `Arc` so errors can travel inside UI messages.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Top-level pipeline error.
#[derive(Error, Debug, Clone)]
pub enum PipelineError {
    /// A step failed during validation or execution.
    #[error("{step_name} failed: {source}")]
    StepFailed {
        step_name: String,
        #[source]
        source: StepError,
    },

    /// The run could not be set up (log file, work directory).
    #[error("Run setup failed: {message}")]
    SetupFailed { message: String },
}

impl PipelineError {
    pub fn step_failed(step_name: impl Into<String>, source: StepError) -> Self {
        Self::StepFailed {
            step_name: step_name.into(),
            source,
        }
    }

    pub fn setup_failed(message: impl Into<String>) -> Self {
        Self::SetupFailed {
            message: message.into(),
        }
    }

    /// The step error underneath, if any.
    pub fn step_error(&self) -> Option<&StepError> {
        match self {
            PipelineError::StepFailed { source, .. } => Some(source),
            PipelineError::SetupFailed { .. } => None,
        }
    }
}

/// Error from a pipeline step with operation context.
#[derive(Error, Debug, Clone)]
pub enum StepError {
    /// A precondition on the run's input was not met.
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    /// The external tool could not be started.
    #[error("Could not start {tool}: {source}")]
    Launch {
        tool: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// The external tool ran and exited unsuccessfully.
    #[error("{tool} failed with {}: {message}", exit_label(.exit_code))]
    CommandFailed {
        tool: String,
        exit_code: Option<i32>,
        message: String,
    },

    /// A required file was not found.
    #[error("Required file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// File I/O error.
    #[error("I/O error while {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// A temporary file could not be removed after a successful merge.
    ///
    /// Reported as a warning; the run still succeeds.
    #[error("Could not remove {}: {source}", .path.display())]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    /// The step finished but its output is missing or unusable.
    #[error("Output validation failed: {0}")]
    InvalidOutput(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl StepError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn launch(tool: impl Into<String>, source: io::Error) -> Self {
        Self::Launch {
            tool: tool.into(),
            source: Arc::new(source),
        }
    }

    pub fn command_failed(
        tool: impl Into<String>,
        exit_code: Option<i32>,
        message: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source: Arc::new(source),
        }
    }

    pub fn cleanup_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CleanupFailed {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    /// An external process was involved (failed to start or exited non-zero).
    pub fn is_process_failure(&self) -> bool {
        matches!(self, StepError::Launch { .. } | StepError::CommandFailed { .. })
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_displays_context() {
        let err = StepError::command_failed("ffmpeg", Some(1), "Invalid data found");
        let msg = err.to_string();
        assert!(msg.contains("ffmpeg"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("Invalid data found"));
        assert!(err.is_process_failure());
    }

    #[test]
    fn signal_exit_is_labelled() {
        let err = StepError::command_failed("vimeo-dl", None, "killed");
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn pipeline_error_chains_step() {
        let err = PipelineError::step_failed(
            "Mux",
            StepError::file_not_found("/work/abc-audio.mp4"),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("Mux failed"));
        assert!(msg.contains("abc-audio.mp4"));
        assert!(matches!(
            err.step_error(),
            Some(StepError::FileNotFound { .. })
        ));
        assert!(!err.step_error().unwrap().is_process_failure());
    }

    #[test]
    fn errors_are_cloneable_with_io_sources() {
        let err = StepError::launch("vimeo-dl", io::Error::from(io::ErrorKind::NotFound));
        let copy = err.clone();
        assert_eq!(err.to_string(), copy.to_string());
    }
}
