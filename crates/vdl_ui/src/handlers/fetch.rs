//! Clip id lookups.

use iced::Task;

use vdl_core::fetch::{ClipFetcher, FetchError};
use vdl_core::models::ClipId;

use crate::app::{App, Message};

impl App {
    /// URL field edited (typed or pasted).
    ///
    /// A valid URL starts a lookup on the blocking pool; the answer comes
    /// back as [`Message::ClipFetched`] tagged with the session generation.
    pub fn handle_url_changed(&mut self, url: String) -> Task<Message> {
        let Some(request) = self.session.set_url(url) else {
            return Task::none();
        };

        let fetcher = match &self.fetcher {
            Ok(fetcher) => fetcher.clone(),
            Err(e) => {
                self.session.fetch_finished(request.generation, Err(e.clone()));
                return Task::none();
            }
        };

        let generation = request.generation;
        Task::perform(lookup_clip(fetcher, request.url), move |result| {
            Message::ClipFetched(generation, result)
        })
    }

    pub fn handle_clip_fetched(&mut self, generation: u64, result: Result<ClipId, FetchError>) {
        if self.session.fetch_finished(generation, result) {
            tracing::debug!("Session now {}", self.session.phase().name());
        }
    }
}

async fn lookup_clip(fetcher: ClipFetcher, url: String) -> Result<ClipId, FetchError> {
    tokio::task::spawn_blocking(move || fetcher.fetch(&url))
        .await
        .unwrap_or_else(|e| {
            Err(FetchError::Request {
                reason: format!("lookup task failed: {}", e),
            })
        })
}
