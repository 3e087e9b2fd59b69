//! Error types for `BlitzWare` core library.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using `BlitzWare` Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for `BlitzWare` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Code reported when a request never produced a response.
pub const FETCH_ERROR: &str = "FETCH_ERROR";

/// Code reported when a body could not be encoded or decoded locally.
pub const CATCH_ERROR: &str = "CATCH_ERROR";

/// Error payload returned by the API for every non-success status.
///
/// Local failures are folded into the same shape using [`FETCH_ERROR`] and
/// [`CATCH_ERROR`] so that callers only ever inspect one structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Transport failure: the server was never reached or hung up.
    pub fn fetch(detail: impl fmt::Display) -> Self {
        Self::new(FETCH_ERROR, format!("Error fetching data: {detail}"))
    }

    /// Local encode/decode failure. `action` reads like "decoding data".
    pub fn catch(action: &str, detail: impl fmt::Display) -> Self {
        Self::new(CATCH_ERROR, format!("Error {action}: {detail}"))
    }

    /// Fallback for error responses whose body is not a `{code, message}` object.
    pub fn from_status(status: u16, reason: Option<&str>) -> Self {
        Self::new(
            format!("HTTP_{status}"),
            reason.unwrap_or("Unknown error").to_string(),
        )
    }

    pub fn is_local(&self) -> bool {
        self.code == FETCH_ERROR || self.code == CATCH_ERROR
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn error_body_deserializes_server_payload() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"code":"ER_NOT_FOUND","message":"Application not found"}"#)
                .unwrap();
        assert_eq!(body.code, "ER_NOT_FOUND");
        assert_eq!(body.message, "Application not found");
        assert!(!body.is_local());
    }

    #[test]
    fn fetch_and_catch_use_fixed_codes() {
        let fetch = ErrorBody::fetch("connection refused");
        assert_eq!(fetch.code, FETCH_ERROR);
        assert_eq!(fetch.message, "Error fetching data: connection refused");
        assert!(fetch.is_local());

        let catch = ErrorBody::catch("decoding data", "missing field `id`");
        assert_eq!(catch.code, CATCH_ERROR);
        assert_eq!(catch.message, "Error decoding data: missing field `id`");
    }

    #[test]
    fn from_status_builds_http_code() {
        let body = ErrorBody::from_status(502, Some("Bad Gateway"));
        assert_eq!(body.code, "HTTP_502");
        assert_eq!(body.message, "Bad Gateway");
        assert_eq!(body.to_string(), "HTTP_502: Bad Gateway");
    }

    #[test]
    fn config_error_display() {
        let err = Error::Config("bad".into());
        assert_eq!(err.to_string(), "Configuration error: bad");
    }
}
