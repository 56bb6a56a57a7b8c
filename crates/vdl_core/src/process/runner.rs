//! Child process runner with streamed stdout.

use std::ffi::OsString;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use crate::models::ToolOutput;

/// An external command: program, arguments and working directory.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}

impl fmt::Display for ToolCommand {
    /// Shell-like rendering for logs. Arguments with spaces are quoted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(char::is_whitespace) || arg.is_empty() {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Run `command` to completion.
///
/// Each stdout line (lossily decoded, line ending stripped) is passed to
/// `on_line` as it arrives. Stderr is collected on a helper thread so a
/// chatty child cannot block on a full pipe. Returns `Err` only when the
/// process cannot be spawned or its output cannot be read.
pub fn run_tool(command: &ToolCommand, mut on_line: impl FnMut(&str)) -> io::Result<ToolOutput> {
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = &command.cwd {
        cmd.current_dir(dir);
    }

    tracing::debug!("Spawning {}", command);
    let mut child = cmd.spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("child stdout was not captured"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other("child stderr was not captured"))?;

    let stderr_handle = thread::spawn(move || {
        let mut raw = Vec::new();
        let mut reader = BufReader::new(stderr);
        let _ = reader.read_to_end(&mut raw);
        String::from_utf8_lossy(&raw).into_owned()
    });

    let mut reader = BufReader::new(stdout);
    let mut raw_line = Vec::new();
    let mut stdout_lines = 0;
    let read_result = loop {
        raw_line.clear();
        match reader.read_until(b'\n', &mut raw_line) {
            Ok(0) => break Ok(()),
            Ok(_) => {
                let line = String::from_utf8_lossy(&raw_line);
                on_line(line.trim_end_matches(['\r', '\n']));
                stdout_lines += 1;
            }
            Err(e) => break Err(e),
        }
    };

    // Reap the child and the stderr reader before reporting any failure.
    let status = child.wait();
    let stderr = join_stderr(stderr_handle, command);
    let status = status?;
    read_result?;

    Ok(ToolOutput {
        exit_code: status.code(),
        stderr,
        stdout_lines,
    })
}

/// Collect the stderr reader's text. A panicked reader loses stderr but
/// not the run.
fn join_stderr(handle: JoinHandle<String>, command: &ToolCommand) -> String {
    handle.join().unwrap_or_else(|_| {
        tracing::warn!("stderr reader for {} panicked; its output is lost", command);
        String::new()
    })
}
