//! Fixtures shared by unit tests: mock tool scripts and a one-shot HTTP server.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use crate::config::Settings;
use crate::logging::{LogConfig, RunLogger};
use crate::models::{ClipId, OutputTarget};
use crate::orchestrator::{Context, EventSink, RunAction, RunEvent, RunRequest};

/// Clip id used by the pipeline fixtures.
pub const CLIP: &str = "abc123";

/// Collects every event a run emits.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<RunEvent>>>);

impl EventLog {
    pub fn sink(&self) -> EventSink {
        let events = Arc::clone(&self.0);
        Arc::new(move |event| events.lock().push(event))
    }

    pub fn snapshot(&self) -> Vec<RunEvent> {
        self.0.lock().clone()
    }

    /// Progress values reported for `step`, in order.
    pub fn progress_for(&self, step: &str) -> Vec<u32> {
        self.snapshot()
            .into_iter()
            .filter_map(|e| match e {
                RunEvent::Progress { step: s, percent } if s == step => Some(percent),
                _ => None,
            })
            .collect()
    }

    pub fn finished_count(&self) -> usize {
        self.snapshot()
            .iter()
            .filter(|e| matches!(e, RunEvent::Finished(_)))
            .count()
    }
}

/// Request for clip [`CLIP`] merged into `<work>/merged.mp4`.
pub fn test_request(action: RunAction) -> RunRequest {
    RunRequest {
        action,
        url: "https://vimeo.com/76979871".to_string(),
        clip: ClipId::new(CLIP).unwrap(),
        output: OutputTarget::new("merged", None).unwrap(),
    }
}

/// Context whose work directory is `dir` and whose events land in `events`.
pub fn test_context(dir: &Path, settings: Settings, events: &EventLog) -> Context {
    let logger = RunLogger::new("test", dir.join("logs"), LogConfig::default(), None).unwrap();
    Context::new(
        settings,
        &test_request(RunAction::Download),
        dir.to_path_buf(),
        Arc::new(logger),
    )
    .with_event_sink(events.sink())
}

/// Write an executable `sh` script into `dir` and return its path.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// Serve exactly one HTTP response and return the URL to request.
pub fn serve_once(status: u16, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }

            let mut stream = stream;
            let _ = write!(
                stream,
                "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.flush();
        }
    });

    format!("http://{}/clip.json", addr)
}

/// Accept one connection and never answer it.
pub fn serve_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            thread::sleep(std::time::Duration::from_secs(5));
            drop(stream);
        }
    });

    format!("http://{}/clip.json", addr)
}
