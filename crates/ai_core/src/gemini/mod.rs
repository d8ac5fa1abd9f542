//! Gemini (Generative Language API) adapter

mod client;
pub mod types;

pub use client::GeminiInferenceEngine;
