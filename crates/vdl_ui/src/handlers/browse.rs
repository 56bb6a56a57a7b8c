//! Output folder picker.

use std::path::PathBuf;

use iced::Task;

use vdl_core::config::ConfigSection;

use crate::app::{App, Message};

impl App {
    pub fn browse_output_dir(&self) -> Task<Message> {
        let start = self
            .session
            .output_dir()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.session.work_dir().to_path_buf());

        Task::perform(
            async move {
                rfd::AsyncFileDialog::new()
                    .set_title("Select Output Directory")
                    .set_directory(start)
                    .pick_folder()
                    .await
                    .map(|f| f.path().to_path_buf())
            },
            Message::OutputDirPicked,
        )
    }

    /// Folder dialog closed. `None` means cancelled.
    pub fn handle_output_dir_picked(&mut self, dir: Option<PathBuf>) {
        let Some(dir) = dir else {
            return;
        };

        tracing::info!("Output folder: {}", dir.display());
        self.session.set_output_dir(Some(dir.clone()));

        if !self.config.settings().paths.remember_output_folder {
            return;
        }

        self.config.settings_mut().paths.output_folder = dir.to_string_lossy().into_owned();
        if let Err(e) = self.config.update_section(ConfigSection::Paths) {
            tracing::warn!("Failed to remember output folder: {}", e);
        }
    }
}
