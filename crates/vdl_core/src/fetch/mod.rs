//! Clip metadata lookup.
//!
//! One blocking HTTP GET per URL; the JSON body must carry a `clip_id`.
//! Callers on an async runtime run [`ClipFetcher::fetch`] inside
//! `spawn_blocking`.

mod client;

pub use client::{ClipFetcher, FetchError};
