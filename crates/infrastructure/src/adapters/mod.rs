//! Infrastructure adapters
//!
//! Adapters connect application ports to the Gemini and Cloud Speech
//! clients.

mod gemini_inference_adapter;
mod recognition_adapter;
mod speech_synthesis_adapter;

pub use gemini_inference_adapter::GeminiInferenceAdapter;
pub use recognition_adapter::RecognitionAdapter;
pub use speech_synthesis_adapter::SpeechSynthesisAdapter;

use ai_speech::SpeechError;
use application::error::ApplicationError;

/// Map a speech client error to an application error
fn map_speech_error(err: SpeechError) -> ApplicationError {
    match err {
        SpeechError::NoAudioData => ApplicationError::NoAudioData,
        SpeechError::RateLimited => ApplicationError::RateLimited,
        SpeechError::Authentication(msg) => ApplicationError::NotAuthorized(msg),
        SpeechError::Configuration(msg) => ApplicationError::Configuration(msg),
        SpeechError::ConnectionFailed(msg) => {
            ApplicationError::ExternalService(format!("Speech service unreachable: {msg}"))
        },
        SpeechError::Timeout(ms) => {
            ApplicationError::ExternalService(format!("Speech service timeout after {ms}ms"))
        },
        other => ApplicationError::Speech(other.to_string()),
    }
}
