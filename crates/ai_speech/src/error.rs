//! Speech processing errors

use ai_core::InferenceError;
use thiserror::Error;

/// Errors that can occur during speech processing
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Failed to connect to speech service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to speech service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Invalid audio format or corrupted data
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// The synthesis response carried no inline audio
    #[error("No audio data in response")]
    NoAudioData,

    /// Transcription failed
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Synthesis failed
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Invalid response from service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during processing
    #[error("Speech processing timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Credentials rejected or token exchange failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Audio processing/conversion failed
    #[error("Audio processing failed: {0}")]
    AudioProcessing(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(30_000)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

impl From<InferenceError> for SpeechError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::ConnectionFailed(msg) => Self::ConnectionFailed(msg),
            InferenceError::Timeout(ms) => Self::Timeout(ms),
            InferenceError::RateLimited => Self::RateLimited,
            InferenceError::Unauthorized(msg) => Self::Authentication(msg),
            InferenceError::ModelNotAvailable(model) => Self::ModelNotAvailable(model),
            InferenceError::InvalidResponse(msg) => Self::InvalidResponse(msg),
            other => Self::RequestFailed(other.to_string()),
        }
    }
}
