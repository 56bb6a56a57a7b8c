//! Result of running an external tool.

/// Exit status and captured standard error of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stderr: String,
    /// Number of stdout lines read.
    pub stdout_lines: usize,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}
