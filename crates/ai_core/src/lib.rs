//! AI Core - Gemini inference client
//!
//! Talks to the Generative Language REST API (`generateContent` and model
//! listing). The wire types in [`gemini::types`] are shared with the speech
//! crate, which drives the same endpoint for audio synthesis.

pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use gemini::GeminiInferenceEngine;
pub use ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};
