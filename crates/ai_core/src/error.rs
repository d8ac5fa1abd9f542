//! Inference errors

use thiserror::Error;

/// Errors that can occur during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to the API
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request could not be sent or completed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API key missing, invalid or lacking permission
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Model not found or not available to this key
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The model returned no usable content
    #[error("Empty response from model")]
    EmptyResponse,

    /// Timeout during inference
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),
}

impl InferenceError {
    /// Whether the failure happened before the API answered
    ///
    /// Covers refused connections, DNS failures, timeouts and 5xx responses.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout(_) | Self::ServerError(_)
        )
    }

    /// Whether the API rejected the credentials
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(30_000)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
