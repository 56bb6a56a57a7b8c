//! Per-run logger with file and callback output.
//!
//! Every download or combine run gets its own logger that:
//! - Writes to a dedicated, timestamped log file
//! - Sends messages to the GUI callback (if provided)
//! - Steps progress lines in compact mode
//! - Keeps the last N lines of tool output for error diagnosis

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{GuiLogCallback, LogConfig, LogLevel, MessagePrefix};

/// Logger for a single download/combine run.
pub struct RunLogger {
    run_name: String,
    log_path: PathBuf,
    file_writer: Mutex<Option<BufWriter<File>>>,
    gui_callback: Option<GuiLogCallback>,
    config: LogConfig,
    /// Recent tool output lines.
    tail_buffer: Mutex<VecDeque<String>>,
    /// Last progress value logged (compact mode).
    last_progress: Mutex<Option<u32>>,
}

impl RunLogger {
    /// Create a logger writing to `<log_dir>/<run_name>_<YYYYmmdd_HHMMSS>.log`.
    pub fn new(
        run_name: impl Into<String>,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
        gui_callback: Option<GuiLogCallback>,
    ) -> std::io::Result<Self> {
        let run_name = run_name.into();
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!("{}_{}.log", sanitize_filename(&run_name), stamp));
        let file = File::create(&log_path)?;

        Ok(Self {
            run_name,
            log_path,
            file_writer: Mutex::new(Some(BufWriter::new(file))),
            gui_callback,
            tail_buffer: Mutex::new(VecDeque::with_capacity(config.error_tail)),
            last_progress: Mutex::new(None),
            config,
        })
    }

    pub fn run_name(&self) -> &str {
        &self.run_name
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }
        self.output(&self.format_message(message));
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, &MessagePrefix::Warning.format(message));
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, &MessagePrefix::Error.format(message));
    }

    /// Log an external command line before it is spawned.
    pub fn command(&self, command: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Command.format(command));
    }

    /// Log a step header.
    pub fn phase(&self, name: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Phase.format(name));
    }

    pub fn success(&self, message: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Success.format(message));
    }

    /// Log a progress value.
    ///
    /// In compact mode only the first value in each `progress_step` bucket
    /// (and 100) is written. Returns whether the line was logged.
    pub fn progress(&self, percent: u32) -> bool {
        if self.config.compact {
            let step = self.config.progress_step.max(1);
            let mut last = self.last_progress.lock();
            if let Some(previous) = *last {
                if percent / step <= previous / step && percent < 100 {
                    return false;
                }
            } else if percent % step != 0 && percent < 100 {
                return false;
            }
            *last = Some(percent);
        }

        self.log(LogLevel::Info, &format!("Progress: {}%", percent));
        true
    }

    /// Record a line of tool output.
    ///
    /// Always kept in the tail buffer; only written out when not compact.
    pub fn output_line(&self, line: &str, is_stderr: bool) {
        if self.config.error_tail > 0 {
            let mut buffer = self.tail_buffer.lock();
            if buffer.len() >= self.config.error_tail {
                buffer.pop_front();
            }
            buffer.push_back(line.to_string());
        }

        if self.config.compact {
            return;
        }

        let msg = if is_stderr {
            format!("[stderr] {}", line)
        } else {
            line.to_string()
        };
        self.output(&self.format_message(&msg));
    }

    /// Write the tail buffer out under a header (after a failure).
    pub fn show_tail(&self, header: &str) {
        let buffer = self.tail_buffer.lock();
        if buffer.is_empty() {
            return;
        }

        self.output(&self.format_message(&format!("[{}/tail]", header)));
        for line in buffer.iter() {
            self.output(&self.format_message(line));
        }
    }

    /// Current tail buffer contents, oldest first.
    pub fn get_tail(&self) -> Vec<String> {
        self.tail_buffer.lock().iter().cloned().collect()
    }

    pub fn flush(&self) {
        if let Some(writer) = self.file_writer.lock().as_mut() {
            let _ = writer.flush();
        }
    }

    fn format_message(&self, message: &str) -> String {
        if self.config.show_timestamps {
            format!("[{}] {}", Local::now().format("%H:%M:%S"), message)
        } else {
            message.to_string()
        }
    }

    fn output(&self, formatted: &str) {
        if let Some(writer) = self.file_writer.lock().as_mut() {
            let _ = writeln!(writer, "{}", formatted);
        }

        if let Some(callback) = &self.gui_callback {
            callback(formatted);
        }
    }
}

impl Drop for RunLogger {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Replace characters that are invalid in file names on common platforms.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() => '_',
            _ => c,
        })
        .collect()
}

/// Builder for [`RunLogger`].
pub struct RunLoggerBuilder {
    run_name: String,
    log_dir: PathBuf,
    config: LogConfig,
    gui_callback: Option<GuiLogCallback>,
}

impl RunLoggerBuilder {
    pub fn new(run_name: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            run_name: run_name.into(),
            log_dir: log_dir.into(),
            config: LogConfig::default(),
            gui_callback: None,
        }
    }

    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.config.compact = compact;
        self
    }

    pub fn gui_callback(mut self, callback: GuiLogCallback) -> Self {
        self.gui_callback = Some(callback);
        self
    }

    pub fn build(self) -> std::io::Result<RunLogger> {
        RunLogger::new(self.run_name, self.log_dir, self.config, self.gui_callback)
    }
}
