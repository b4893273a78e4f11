//! Authentication error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The Auth API answered with a non-success status.
    #[error("Auth API rejected the request ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Api { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] marquee_storage::StorageError),

    #[error("A login request is already in progress")]
    LoginInProgress,
}

impl AuthError {
    /// Human-readable message supplied by the server, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            AuthError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AuthError::Api { status, .. } => Some(*status),
            AuthError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Failure to turn a bearer token into claims.
///
/// Never returned to callers of the session manager; it only ever
/// triggers an implicit logout.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Token must have at least 2 segments, found {0}")]
    Segments(usize),

    #[error("Token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Token claims are malformed: {0}")]
    Claims(#[from] serde_json::Error),

    /// Raw `exp` claim, which may lie outside the representable date range.
    #[error("Token expired at unix time {0}")]
    Expired(i64),
}
