//! Paste button.

use iced::Task;

use crate::app::{App, Message};

impl App {
    /// Read the clipboard off the UI thread and feed it to the URL field.
    pub fn paste_url(&self) -> Task<Message> {
        Task::perform(read_clipboard(), Message::UrlPasted)
    }
}

async fn read_clipboard() -> Option<String> {
    let text = tokio::task::spawn_blocking(|| {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| tracing::warn!("Clipboard unavailable: {}", e))
            .ok()?;
        clipboard
            .get_text()
            .map_err(|e| tracing::debug!("Clipboard has no text: {}", e))
            .ok()
    })
    .await
    .ok()
    .flatten()?;

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
