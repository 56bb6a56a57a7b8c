//! Download / combine runs.

use std::sync::Arc;

use iced::futures::channel::mpsc;
use iced::Task;

use vdl_core::orchestrator::{spawn_run, EventSink, PipelineError, RunAction, RunEvent};

use crate::app::{App, Message};

impl App {
    /// Download or Combine pressed.
    ///
    /// The run happens on a worker thread; its events are forwarded through
    /// an unbounded channel and arrive here as [`Message::Run`].
    pub fn handle_start(&mut self, action: RunAction) -> Task<Message> {
        let started = match action {
            RunAction::Download => self.session.start_download(),
            RunAction::Combine => self.session.start_combine(),
        };
        let request = match started {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Cannot {}: {}", action, e);
                return Task::none();
            }
        };

        let (tx, rx) = mpsc::unbounded();
        let sink: EventSink = Arc::new(move |event: RunEvent| {
            // Receiver is gone only when the window closed mid-run.
            let _ = tx.unbounded_send(event);
        });

        let settings = self.session.settings().clone();
        let work_dir = self.session.work_dir().to_path_buf();
        if let Err(e) = spawn_run(request, settings, work_dir, sink) {
            tracing::error!("Failed to start worker: {}", e);
            self.session.run_finished(Err(PipelineError::setup_failed(format!(
                "cannot start worker thread: {}",
                e
            ))));
            return Task::none();
        }

        Task::run(rx, Message::Run)
    }

    pub fn handle_run_event(&mut self, event: RunEvent) {
        if self.session.apply_event(event) {
            if let Some(report) = self.session.report() {
                tracing::info!("Saved {}", report.output_path.display());
            }
        }
    }
}
