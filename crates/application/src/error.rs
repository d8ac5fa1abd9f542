//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// Speech synthesis or recognition error
    #[error("Speech error: {0}")]
    Speech(String),

    /// The synthesis response carried no audio
    #[error("No audio data received from Gemini")]
    NoAudioData,

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Credentials rejected by the vendor
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::RateLimited | ApplicationError::ExternalService(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_is_retryable() {
        assert!(ApplicationError::RateLimited.is_retryable());
        assert!(ApplicationError::ExternalService("down".into()).is_retryable());
        assert!(!ApplicationError::NoAudioData.is_retryable());
    }

    #[test]
    fn domain_errors_pass_through() {
        let err: ApplicationError = DomainError::not_found("service", "nope").into();
        assert!(matches!(err, ApplicationError::Domain(_)));
        assert_eq!(
            err.to_string(),
            DomainError::not_found("service", "nope").to_string()
        );
    }

    #[test]
    fn no_audio_message() {
        assert_eq!(
            ApplicationError::NoAudioData.to_string(),
            "No audio data received from Gemini"
        );
    }
}
