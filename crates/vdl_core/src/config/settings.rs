//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// External tool locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Clip metadata lookup.
    #[serde(default)]
    pub network: NetworkSettings,

    /// Progress markers scanned for in tool output.
    #[serde(default)]
    pub progress: ProgressSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Identifies a settings section for section-level updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Tools,
    Paths,
    Network,
    Progress,
    Logging,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 5] = [
        ConfigSection::Tools,
        ConfigSection::Paths,
        ConfigSection::Network,
        ConfigSection::Progress,
        ConfigSection::Logging,
    ];

    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "tools",
            ConfigSection::Paths => "paths",
            ConfigSection::Network => "network",
            ConfigSection::Progress => "progress",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section header.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "# External downloader and muxer executables",
            ConfigSection::Paths => "# Working, output and log directories",
            ConfigSection::Network => "# Clip metadata lookup",
            ConfigSection::Progress => "# Substrings in tool output that advance the progress bar",
            ConfigSection::Logging => "# Logging configuration",
        }
    }
}

/// Executables invoked for downloading and muxing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Downloader executable (name on PATH or full path).
    #[serde(default = "default_downloader_path")]
    pub downloader_path: String,

    /// Muxer executable (name on PATH or full path).
    #[serde(default = "default_muxer_path")]
    pub muxer_path: String,
}

fn default_downloader_path() -> String {
    if cfg!(windows) {
        "vimeo-dl.exe".to_string()
    } else {
        "vimeo-dl".to_string()
    }
}

fn default_muxer_path() -> String {
    if cfg!(windows) {
        "ffmpeg.exe".to_string()
    } else {
        "ffmpeg".to_string()
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            downloader_path: default_downloader_path(),
            muxer_path: default_muxer_path(),
        }
    }
}

/// Path configuration for the work directory, output and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Directory the downloader writes `{id}-video.mp4` / `{id}-audio.mp4` into.
    #[serde(default = "default_work_dir")]
    pub work_dir: String,

    /// Output folder for merged files. Empty means the work directory.
    #[serde(default)]
    pub output_folder: String,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Persist the output folder picked in the UI.
    #[serde(default = "default_true")]
    pub remember_output_folder: bool,
}

fn default_work_dir() -> String {
    ".".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            output_folder: String::new(),
            logs_folder: default_logs_folder(),
            remember_output_folder: true,
        }
    }
}

impl PathSettings {
    /// Configured output folder, if any.
    pub fn output_folder(&self) -> Option<PathBuf> {
        let trimmed = self.output_folder.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(PathBuf::from(trimmed))
        }
    }
}

/// Clip metadata lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// Timeout for the metadata GET, in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_fetch_timeout() -> u64 {
    5
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl NetworkSettings {
    /// Fetch timeout clamped to 1..=30 seconds.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.clamp(1, 30))
    }
}

/// Progress markers scanned for in tool stdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSettings {
    /// Substring in downloader output that advances progress.
    #[serde(default = "default_download_marker")]
    pub download_marker: String,

    /// Substring in muxer output that advances progress.
    #[serde(default = "default_mux_marker")]
    pub mux_marker: String,

    /// Percentage added per marker line.
    #[serde(default = "default_step_pct")]
    pub step_pct: f32,
}

fn default_download_marker() -> String {
    "Downloading".to_string()
}

fn default_mux_marker() -> String {
    "progress".to_string()
}

fn default_step_pct() -> f32 {
    1.0
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            download_marker: default_download_marker(),
            mux_marker: default_mux_marker(),
            step_pct: default_step_pct(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default level when RUST_LOG is not set.
    #[serde(default)]
    pub level: LogLevel,

    /// Use compact run logs (tool output only kept in the tail buffer).
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of tool output lines kept for error diagnosis.
    #[serde(default = "default_error_tail")]
    pub error_tail: u32,

    /// Progress log step percentage.
    #[serde(default = "default_progress_step")]
    pub progress_step: u32,
}

fn default_error_tail() -> u32 {
    20
}

fn default_progress_step() -> u32 {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            compact: true,
            error_tail: default_error_tail(),
            progress_step: default_progress_step(),
        }
    }
}
