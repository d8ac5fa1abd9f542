//! Speech provider implementations

mod cloud_speech;
mod gemini_stt;
mod gemini_tts;

pub use cloud_speech::CloudSpeechProvider;
pub use gemini_stt::{GeminiSttProvider, TRANSCRIPTION_PROMPT};
pub use gemini_tts::GeminiTtsProvider;
