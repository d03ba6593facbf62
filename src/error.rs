//! Crate error type.

use thiserror::Error;

/// Errors raised while wiring the page together.
#[derive(Error, Debug)]
pub enum Error {
    /// A required element is not in the document.
    #[error("Missing element: #{0}")]
    MissingElement(&'static str),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;
