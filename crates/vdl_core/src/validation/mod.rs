//! Input validation for the URL and output name fields.

mod url;

pub use url::{is_valid_url, validate_url};

use thiserror::Error;

/// Rejected user input. Shown inline; never changes the session phase on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL cannot be empty")]
    EmptyUrl,

    #[error("Enter a valid URL")]
    InvalidUrl,

    #[error("Output name cannot be empty")]
    EmptyOutputName,
}
