//! Error types for request dispatch and response decoding.
//!
//! Assertion failures are not errors: they panic and fail the test that
//! made them. Everything here is a condition the test cannot recover from,
//! propagated with `?` to the test function.

use http::Method;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while talking to the catalog service.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body did not match the expected JSON shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The stub catalog could not bind its listener.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of transport failures, used in log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connect,
    Timeout,
    Body,
    Other,
}

impl Error {
    pub(crate) fn transport(method: Method, url: &str, source: reqwest::Error) -> Self {
        Error::Transport {
            method,
            url: url.to_string(),
            source,
        }
    }

    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport { source, .. } => {
                if source.is_timeout() {
                    ErrorKind::Timeout
                } else if source.is_connect() {
                    ErrorKind::Connect
                } else if source.is_body() || source.is_decode() {
                    ErrorKind::Body
                } else {
                    ErrorKind::Other
                }
            }
            Error::Encode(_) | Error::Decode(_) => ErrorKind::Body,
            Error::Client(_) | Error::Config(_) | Error::Io(_) => ErrorKind::Other,
        }
    }

    /// Returns true if the request timed out.
    pub fn is_timeout(&self) -> bool {
        self.kind() == ErrorKind::Timeout
    }

    /// Returns true if no connection could be established.
    pub fn is_connect(&self) -> bool {
        self.kind() == ErrorKind::Connect
    }
}
