//! Vimeo DL GUI - Main entry point
//!
//! Handles:
//! - Configuration loading
//! - Application-level logging initialization
//! - Directory creation
//! - Application launch

use std::path::PathBuf;

use vdl_core::config::ConfigManager;
use vdl_core::logging::init_tracing_with_file;

mod app;
mod handlers;
mod theme;
mod widgets;

use app::App;

/// Default config path: .config/settings.toml (relative to current working directory)
fn default_config_path() -> PathBuf {
    PathBuf::from(".config").join("settings.toml")
}

fn main() -> iced::Result {
    // Load configuration first (needed for the logs directory and level)
    let config_path = default_config_path();
    let mut config_manager = ConfigManager::new(&config_path);

    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    let logs_dir = config_manager.logs_folder();
    let _log_guard =
        init_tracing_with_file(config_manager.settings().logging.level, &logs_dir);

    tracing::info!("Vimeo DL GUI starting");
    tracing::info!("Config: {}", config_path.display());
    tracing::info!("Core version: {}", vdl_core::version());

    if let Err(e) = config_manager.ensure_dirs_exist() {
        tracing::error!("Failed to create directories: {}", e);
        eprintln!("Warning: Failed to create directories: {}", e);
    }

    let settings = config_manager.settings().clone();
    tracing::debug!(
        "Tools: downloader={}, muxer={}",
        settings.tools.downloader_path,
        settings.tools.muxer_path
    );

    iced::application(
        move || App::new(config_path.clone(), settings.clone()),
        App::update,
        App::view,
    )
    .title(App::title)
    .theme(App::theme)
    .window_size((620.0, 520.0))
    .run()
}
