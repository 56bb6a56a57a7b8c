//! VDL Core - Backend logic for Vimeo DL GUI
//!
//! This crate contains all business logic with zero UI dependencies:
//! URL validation, clip metadata lookup, the downloader/muxer steps and the
//! session state machine the GUI renders. It can be driven by the GUI
//! application or a CLI tool.

pub mod config;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod process;
pub mod session;
pub mod validation;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
