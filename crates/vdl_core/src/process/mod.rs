//! External tool execution.
//!
//! - [`ToolCommand`] / [`run_tool`]: spawn a child, stream stdout line by
//!   line to a callback, drain stderr on a helper thread
//! - [`ProgressTracker`]: marker-driven progress that only reaches 100 on
//!   confirmed completion

mod progress;
mod runner;

pub use progress::ProgressTracker;
pub use runner::{run_tool, ToolCommand};
