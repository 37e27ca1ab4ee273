use reqwest::StatusCode;
use thiserror::Error;

use crate::storage::StorageError;

/// Everything that can go wrong talking to the backend.
///
/// An unexpected response *shape* is not in here: list bodies are reshaped by
/// [`trend_common::normalize`] instead of being rejected.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure, timeout, or a request that could not be built.
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The session is no longer valid; the stored token has been cleared and
    /// the user should be sent to `redirect`.
    #[error("session expired; redirecting to {redirect}")]
    Unauthorized { redirect: &'static str },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("API responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid base URL {0:?}; it cannot carry path segments")]
    BaseUrl(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
