//! Logging infrastructure for Vimeo DL GUI.
//!
//! Two layers:
//! - Application-wide `tracing` subscriber (stderr plus a daily log file)
//! - Per-run [`RunLogger`] with file + GUI callback output, compact
//!   progress filtering and a tail buffer of recent tool output
//!
//! # Example
//!
//! ```no_run
//! use vdl_core::logging::{LogConfig, RunLogger};
//!
//! let logger = RunLogger::new("download_abc123", ".logs", LogConfig::default(), None).unwrap();
//! logger.phase("Download");
//! logger.command("vimeo-dl -i https://vimeo.com/1");
//! logger.progress(40);
//! logger.success("Merged clip.mp4");
//! ```

mod run_logger;
mod types;

pub use run_logger::{RunLogger, RunLoggerBuilder};
pub use types::{GuiLogCallback, LogConfig, LogLevel, MessagePrefix};

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const APP_LOG_PREFIX: &str = "vimeo-dl-gui.log";

fn env_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.as_filter_str()))
}

/// Initialize the global tracing subscriber (stderr only).
///
/// Respects RUST_LOG, falling back to `default_level`. Call once at startup.
pub fn init_tracing(default_level: LogLevel) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(env_filter(default_level))
        .init();
}

/// Initialize the global subscriber with stderr and a daily-rolling file in `logs_dir`.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the application. If the logs directory cannot be created
/// only the stderr layer is installed and `None` is returned.
pub fn init_tracing_with_file(default_level: LogLevel, logs_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(logs_dir) {
        init_tracing(default_level);
        tracing::warn!("Cannot create logs folder {}: {}", logs_dir.display(), e);
        return None;
    }

    let appender = tracing_appender::rolling::daily(logs_dir, APP_LOG_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .with(env_filter(default_level))
        .init();

    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_filter_strings() {
        assert_eq!(LogLevel::Debug.as_filter_str(), "debug");
        assert_eq!(LogLevel::Info.as_filter_str(), "info");
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }
}
