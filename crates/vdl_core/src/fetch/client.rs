//! Blocking clip metadata client.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::config::NetworkSettings;
use crate::models::ClipId;

/// Failure to obtain a clip identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure: DNS, connect, timeout, TLS.
    #[error("Fetch failed: {reason}")]
    Request { reason: String },

    /// Server answered with a non-success status.
    #[error("Fetch failed: HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// Body was not JSON or carried no usable `clip_id`.
    #[error("clip_id not found: {reason}")]
    ClipIdNotFound { reason: String },
}

impl FetchError {
    /// True for transport and status failures, false when the body was unusable.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, FetchError::Request { .. } | FetchError::HttpStatus { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            format!("timed out ({})", err)
        } else {
            err.to_string()
        };
        FetchError::Request { reason }
    }
}

/// Resolves a clip URL to its identifier.
#[derive(Debug, Clone)]
pub struct ClipFetcher {
    client: reqwest::blocking::Client,
}

impl ClipFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vimeo-dl-gui/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn from_settings(settings: &NetworkSettings) -> Result<Self, FetchError> {
        Self::new(settings.fetch_timeout())
    }

    /// GET `url` and extract `clip_id` from the JSON body.
    pub fn fetch(&self, url: &str) -> Result<ClipId, FetchError> {
        tracing::debug!("Fetching clip metadata from {}", url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        let clip_id = parse_clip_id(&body)?;
        tracing::info!("Resolved clip id {}", clip_id);
        Ok(clip_id)
    }
}

/// Extract `clip_id` (string or number) from a JSON document.
fn parse_clip_id(body: &str) -> Result<ClipId, FetchError> {
    let json: Value = serde_json::from_str(body).map_err(|e| FetchError::ClipIdNotFound {
        reason: format!("response is not JSON ({})", e),
    })?;

    let raw = match json.get("clip_id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(FetchError::ClipIdNotFound {
                reason: format!("unexpected clip_id value {}", other),
            })
        }
        None => {
            return Err(FetchError::ClipIdNotFound {
                reason: "response has no clip_id".to_string(),
            })
        }
    };

    ClipId::new(raw).ok_or_else(|| FetchError::ClipIdNotFound {
        reason: "clip_id is empty".to_string(),
    })
}
