//! Gemini inference adapter - Implements InferencePort using ai_core

use std::time::Instant;

use ai_core::{
    GeminiInferenceEngine, InferenceConfig, InferenceEngine, InferenceError, InferenceRequest,
};
use application::{
    error::ApplicationError,
    ports::{GenerationRequest, InferencePort, InferenceResult},
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Adapter for the Gemini `generateContent` endpoint
#[derive(Debug, Clone)]
pub struct GeminiInferenceAdapter {
    engine: GeminiInferenceEngine,
}

impl GeminiInferenceAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let engine = GeminiInferenceEngine::new(config).map_err(Self::map_error)?;
        Ok(Self { engine })
    }

    /// Wrap an existing engine
    pub const fn from_engine(engine: GeminiInferenceEngine) -> Self {
        Self { engine }
    }

    /// Underlying engine
    pub const fn engine(&self) -> &GeminiInferenceEngine {
        &self.engine
    }

    /// Convert ai_core error to application error
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::Unauthorized(msg) => ApplicationError::NotAuthorized(msg),
            InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("Gemini connection failed: {msg}"))
            },
            InferenceError::Timeout(ms) => {
                ApplicationError::ExternalService(format!("Inference timeout after {ms}ms"))
            },
            InferenceError::ServerError(msg) => ApplicationError::ExternalService(msg),
            other => ApplicationError::Inference(other.to_string()),
        }
    }
}

#[async_trait]
impl InferencePort for GeminiInferenceAdapter {
    #[instrument(skip(self, request), fields(model = %request.model, prompt_len = request.prompt.len()))]
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();

        let inference = InferenceRequest::simple(request.prompt)
            .with_model(request.model)
            .with_temperature(request.temperature)
            .with_max_tokens(request.max_tokens);

        let response = self
            .engine
            .generate(inference)
            .await
            .map_err(Self::map_error)?;

        debug!(
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            finish_reason = ?response.finish_reason,
            "Gemini response received"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
        })
    }

    async fn is_healthy(&self) -> bool {
        match self.engine.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "Gemini health check failed");
                false
            },
        }
    }
}
