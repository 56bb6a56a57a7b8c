//! Message handlers.
//!
//! Each submodule adds `impl App` blocks for one concern. Handlers translate
//! messages into [`Session`](vdl_core::session::Session) calls and start the
//! background work (lookups, dialogs, runs) that feeds results back in.

mod browse;
mod clipboard;
mod fetch;
mod run;
