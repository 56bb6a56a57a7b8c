//! Pipeline step trait definition.

use super::errors::StepResult;
use super::types::{Context, JobState};

/// Trait for pipeline steps.
///
/// The pipeline calls these methods in order:
///
/// 1. `validate_input` - check preconditions (binaries configured, files present)
/// 2. `execute` - run the external tool and record results in `state`
/// 3. `validate_output` - verify the step produced what it claims
///
/// `validate_output` only runs when `execute` succeeded.
pub trait PipelineStep: Send + Sync {
    /// Step name, used in logs and error context.
    fn name(&self) -> &str;

    fn validate_input(&self, ctx: &Context) -> StepResult<()>;

    fn execute(&self, ctx: &Context, state: &mut JobState) -> StepResult<()>;

    fn validate_output(&self, ctx: &Context, state: &JobState) -> StepResult<()>;

    /// Human-readable description of what this step does.
    fn description(&self) -> &str {
        self.name()
    }
}
