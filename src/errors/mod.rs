//! Error types for the Twitter client.
//!
//! Every failure mode collapses into [`TwitterError`], tagged so callers can
//! tell "could not reach the server" apart from "server rejected the request"
//! apart from "could not understand the response" when deciding on retry or
//! backoff policy above this crate.

use thiserror::Error;

/// Result type for Twitter operations
pub type TwitterResult<T> = Result<T, TwitterError>;

/// Root error type for the Twitter client
#[derive(Error, Debug)]
pub enum TwitterError {
    /// Invalid construction inputs: unsupported response format, bad host,
    /// unusable credentials
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// The HTTP call could not complete (connection, DNS, timeout, or
    /// body-read failure); carries the underlying cause
    #[error("Request error: {message}")]
    Transport {
        /// Error message including the transport cause
        message: String,
    },

    /// The server answered with a non-200 status
    #[error("API error: {message}")]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// A nominally successful response body could not be decoded
    #[error("Parse error: {message}")]
    Parse {
        /// Error message
        message: String,
    },

    /// A media file path could not be read into bytes
    #[error("Media error: {message}")]
    Media {
        /// Error message
        message: String,
    },
}

impl TwitterError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// True when the HTTP call itself failed
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// True when the server rejected the request
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// True when a successful response body could not be decoded
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// HTTP status code for API-reported failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TwitterError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };
        Self::Transport { message }
    }
}
