//! Errors surfaced to the user by the session.

use thiserror::Error;

use crate::fetch::FetchError;
use crate::orchestrator::{PipelineError, RunAction};
use crate::validation::ValidationError;

/// Anything that can go wrong in response to a user action.
///
/// Never fatal: the session always lands in a usable phase.
#[derive(Error, Debug, Clone)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The action's button should not have been enabled in this phase.
    #[error("Cannot {action} while {phase}")]
    ActionUnavailable {
        action: RunAction,
        phase: &'static str,
    },
}

impl WorkflowError {
    /// An external tool failed to start or exited unsuccessfully.
    pub fn is_process_failure(&self) -> bool {
        match self {
            WorkflowError::Pipeline(e) => e.step_error().is_some_and(|s| s.is_process_failure()),
            _ => false,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, WorkflowError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::StepError;

    #[test]
    fn process_failures_are_recognised() {
        let err: WorkflowError = PipelineError::step_failed(
            "Download",
            StepError::command_failed("vimeo-dl", Some(1), "boom"),
        )
        .into();
        assert!(err.is_process_failure());

        let err: WorkflowError = ValidationError::InvalidUrl.into();
        assert!(!err.is_process_failure());
        assert!(err.is_validation());
    }

    #[test]
    fn messages_pass_through() {
        let err: WorkflowError = ValidationError::EmptyOutputName.into();
        assert_eq!(err.to_string(), "Output name cannot be empty");
    }
}
