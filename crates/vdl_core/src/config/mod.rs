//! Configuration management for Vimeo DL GUI.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Cleanup on load with automatic defaults
//!
//! The loaded [`Settings`] value is what replaces process-wide constants:
//! tool paths and directories are passed explicitly into the session.
//!
//! # Example
//!
//! ```no_run
//! use vdl_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/settings.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Muxer: {}", config.settings().tools.muxer_path);
//!
//! config.settings_mut().paths.output_folder = "/videos".to_string();
//! config.update_section(ConfigSection::Paths).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, LoggingSettings, NetworkSettings, PathSettings, ProgressSettings, Settings,
    ToolSettings,
};
