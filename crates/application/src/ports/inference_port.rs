//! Inference port - Interface for text generation

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Parameters of a single generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Fully assembled prompt
    pub prompt: String,
    /// Model to generate with
    pub model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Output token limit
    pub max_tokens: u32,
}

/// Result of an inference call
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Generated response content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Number of tokens used (if available)
    pub tokens_used: Option<u32>,
}

/// Port for inference operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Generate a response for a prompt
    async fn generate(&self, request: GenerationRequest)
    -> Result<InferenceResult, ApplicationError>;

    /// Check if the inference backend is reachable
    async fn is_healthy(&self) -> bool;
}
