//! Response parsing for the Twitter client.
//!
//! The pipeline depends only on the [`Parser`] trait; which concrete format
//! a client speaks is decided at construction time. [`JsonParser`] is the
//! default and currently the only built-in format.

use crate::errors::{TwitterError, TwitterResult};
use serde_json::Value;

/// Fallback message when an error body yields nothing usable
pub const GENERIC_ERROR_MESSAGE: &str = "unspecified API error";

/// Decodes response bodies into structured values or error messages
pub trait Parser: Send + Sync {
    /// Whether this parser can decode the given response format
    fn supports_format(&self, format: &str) -> bool;

    /// Decode a successful response body into a structured value
    fn parse_content(&self, body: &[u8]) -> TwitterResult<Value>;

    /// Best-effort extraction of a server-supplied error message
    ///
    /// Never fails; falls back to [`GENERIC_ERROR_MESSAGE`] when the body
    /// carries no recognizable message.
    fn parse_error(&self, body: &[u8]) -> String;
}

/// JSON response parser backed by serde_json
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Create a new JSON parser
    pub fn new() -> Self {
        Self
    }
}

impl Parser for JsonParser {
    fn supports_format(&self, format: &str) -> bool {
        format.eq_ignore_ascii_case("json")
    }

    fn parse_content(&self, body: &[u8]) -> TwitterResult<Value> {
        serde_json::from_slice(body).map_err(|e| TwitterError::parse(e.to_string()))
    }

    fn parse_error(&self, body: &[u8]) -> String {
        let Ok(value) = serde_json::from_slice::<Value>(body) else {
            return GENERIC_ERROR_MESSAGE.to_string();
        };

        // Singular shape: {"error": "..."}
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return message.to_string();
        }

        // List shape: {"errors": [{"message": "..."}, ...]}
        if let Some(errors) = value.get("errors").and_then(Value::as_array) {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect();
            if !messages.is_empty() {
                return messages.join("; ");
            }
        }

        GENERIC_ERROR_MESSAGE.to_string()
    }
}
