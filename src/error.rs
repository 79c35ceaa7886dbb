//! Error types for copydeck library.

use std::io;
use thiserror::Error;

/// Result type alias for copydeck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while retrieving or rendering copy.
///
/// Decoding itself never fails; these errors come from the layers around it.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport-level failure talking to the text service.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The text service answered with a non-success status.
    #[error("Text service returned status {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// A configured URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A language identifier was rejected.
    #[error("Invalid language identifier: {0:?}")]
    InvalidLanguage(String),

    /// Error during rendering (HTML, Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match (err.status(), err.url()) {
            (Some(status), Some(url)) => Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            },
            _ => Error::Http(err.to_string()),
        }
    }
}
