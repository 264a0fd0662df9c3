//! API client errors.

use thiserror::Error;

/// Errors produced by calls to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection, TLS, body decoding).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend reported a failure; the string is its user-facing
    /// message, surfaced verbatim.
    #[error("{0}")]
    Backend(String),

    /// A successful response arrived without the expected `data` payload.
    #[error("response missing data payload")]
    MissingData,

    /// The call requires authentication and no valid token is held.
    #[error("not authenticated")]
    Unauthenticated,

    /// The request body could not be encoded.
    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),

    /// The response payload could not be decoded into the expected shape.
    #[error("failed to decode response payload")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// The backend's own message when there is one, for callers that show
    /// it verbatim and fall back to a generic message otherwise.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Backend(message) => Some(message),
            _ => None,
        }
    }
}
