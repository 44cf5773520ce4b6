//! Error types used throughout the client

use thiserror::Error;

/// Longest response-body excerpt carried inside an error.
const BODY_SNIPPET_MAX: usize = 2048;

/// Main error type for the Hyperproof client
#[derive(Error, Debug)]
pub enum HyperproofError {
    /// Credential or token acquisition failure.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Network-level failure: DNS, connect, TLS, timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote rejected the request (HTTP 4xx).
    #[error("Client error (HTTP {status}): {body}")]
    Client {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        body: String,
    },

    /// The remote failed to serve the request (HTTP 5xx).
    #[error("Server error (HTTP {status}): {body}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        body: String,
    },

    /// Response body did not match the expected JSON shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller-supplied arguments rejected before any request was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl HyperproofError {
    /// Classify a non-success HTTP status into [`Self::Client`] or
    /// [`Self::Server`], carrying a body excerpt for diagnosability.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let body = body_snippet(body);
        if (400..500).contains(&status) {
            Self::Client { status, body }
        } else {
            Self::Server { status, body }
        }
    }
}

/// Truncate a response body to an excerpt safe to embed in error messages.
#[must_use]
pub fn body_snippet(body: &str) -> String {
    if body.len() <= BODY_SNIPPET_MAX {
        return body.to_owned();
    }
    let mut end = BODY_SNIPPET_MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, HyperproofError>;
