//! Client error type and its mapping onto the API error shape.

use blitzware_core::auth::AuthChallenge;
use blitzware_core::ErrorBody;
use thiserror::Error;

/// Errors returned by every client call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connect, TLS, timeout, I/O).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A request body could not be encoded or a response body decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server answered with an error status.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: ErrorBody },

    #[error("Configuration error: {0}")]
    Config(String),

    /// The operation needs a logged-in account.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A verification code was submitted with no matching login challenge.
    #[error("Login is not awaiting {}", .0.code())]
    NoPendingChallenge(AuthChallenge),
}

impl ClientError {
    /// The error as a `{code, message}` pair.
    ///
    /// Transport failures map to `FETCH_ERROR`, local encode/decode failures
    /// to `CATCH_ERROR`; server errors keep their own payload.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            Self::Http(e) => ErrorBody::fetch(e),
            Self::Json(e) => ErrorBody::catch("decoding data", e),
            Self::Api { body, .. } => body.clone(),
            Self::Config(msg) => ErrorBody::catch("configuring client", msg),
            Self::NotAuthenticated => ErrorBody::new("NOT_AUTHENTICATED", "Not authenticated"),
            Self::NoPendingChallenge(challenge) => ErrorBody::new(
                "NO_PENDING_CHALLENGE",
                format!("Login is not awaiting {}", challenge.code()),
            ),
        }
    }

    /// HTTP status for server errors.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Secondary login verification requested by the server, if any.
    pub fn challenge(&self) -> Option<AuthChallenge> {
        match self {
            Self::Api { body, .. } => AuthChallenge::from_error(body),
            _ => None,
        }
    }
}
