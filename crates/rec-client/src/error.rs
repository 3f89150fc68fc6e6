//! Error types for the recommendation client.
//!
//! Every failure is terminal for the call that produced it. Nothing is
//! retried here; the caller re-issues on the next user action.

use std::time::Duration;

use thiserror::Error;

/// Shown whenever the service cannot be reached, regardless of the
/// underlying transport error.
pub const CONNECTION_FAILURE_MESSAGE: &str =
    "Cannot connect to API. Make sure FastAPI is running on port 8000.";

/// Used when a non-2xx body carries no `detail` field.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Errors that can occur when talking to the recommendation service
#[derive(Error, Debug)]
pub enum ClientError {
    /// Service unreachable (refused, DNS failure, connect timeout)
    #[error("{}", CONNECTION_FAILURE_MESSAGE)]
    Connection,

    /// No response within the per-call timeout
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Non-2xx response; `detail` is surfaced verbatim
    #[error("{detail}")]
    Backend { status: u16, detail: String },

    /// Anything else, including a success body that fails to decode
    #[error("{0}")]
    Unexpected(String),

    /// The HTTP client could not be built
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Classify a transport error from reqwest.
    ///
    /// Connect failures win over timeouts so a connect timeout still gets
    /// the remediation message.
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_connect() {
            ClientError::Connection
        } else if err.is_timeout() {
            ClientError::Timeout(timeout)
        } else {
            ClientError::Unexpected(err.to_string())
        }
    }

    /// Build an error from a non-2xx response body.
    ///
    /// A string `detail` is used as-is, any other JSON `detail` (FastAPI
    /// validation errors are arrays) is rendered as compact JSON, and a
    /// JSON body without the field falls back to "Unknown error". A body
    /// that is not JSON at all surfaces the parse error text.
    pub(crate) fn from_error_body(status: u16, body: &[u8]) -> Self {
        let value = match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(value) => value,
            Err(e) => return ClientError::Unexpected(e.to_string()),
        };

        let detail = match value.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => UNKNOWN_ERROR_MESSAGE.to_string(),
            Some(other) => other.to_string(),
        };

        ClientError::Backend { status, detail }
    }

    /// A 2xx body that does not match the expected shape.
    pub(crate) fn from_decode(err: serde_json::Error) -> Self {
        ClientError::Unexpected(format!("Invalid response body: {}", err))
    }

    /// HTTP status of a backend error, if there was a response at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ClientError>;
