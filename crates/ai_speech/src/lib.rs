//! AI Speech - Speech synthesis and recognition adapters
//!
//! Provides traits and implementations for speech processing:
//! - `TextToSpeech` - Synthesize speech with a Gemini prebuilt voice
//! - `SpeechToText` - Recognize buffered audio (Cloud Speech or Gemini)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//! - `wav` frames raw PCM into a RIFF/WAVE container
//! - `auth` exchanges service-account credentials for OAuth access tokens
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{GeminiTtsProvider, SpeechConfig, SynthesisRequest, TextToSpeech, wav};
//!
//! let provider = GeminiTtsProvider::new(config)?;
//! let pcm = provider.synthesize(SynthesisRequest::new("Hello!").with_voice("Kore")).await?;
//! let file = wav::wrap_pcm(pcm.data(), wav::WavSpec::gemini_tts())?;
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;
pub mod wav;

pub use auth::{ServiceAccountCredentials, ServiceAccountTokenProvider};
pub use config::{SpeechConfig, SttProvider};
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::{CloudSpeechProvider, GeminiSttProvider, GeminiTtsProvider};
pub use types::{
    AudioData, AudioEncoding, AudioFormat, RecognitionConfig, SynthesisRequest, Transcription,
    VoiceInfo,
};
