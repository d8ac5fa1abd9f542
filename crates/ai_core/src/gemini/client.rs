//! Generative Language REST client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, instrument, warn};

use super::types::{
    ErrorEnvelope, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ListModelsResponse, ModelInfo,
};
use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini inference engine backed by the Generative Language REST API
#[derive(Debug, Clone)]
pub struct GeminiInferenceEngine {
    client: Client,
    config: InferenceConfig,
}

impl GeminiInferenceEngine {
    /// Create a new Gemini inference engine
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.default_model,
            timeout_ms = ?config.timeout_ms,
            "Initialized Gemini inference engine"
        );

        Ok(Self { client, config })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Get the model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a InferenceRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }

    /// Call `models/{model}:generateContent` with an arbitrary request body
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, on a non-2xx status, or when
    /// the body cannot be decoded.
    #[instrument(skip(self, request), fields(model = %model, parts = request.contents.iter().map(|c| c.parts.len()).sum::<usize>()))]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, InferenceError> {
        let model = model.strip_prefix("models/").unwrap_or(model);
        debug!("Sending generateContent request");

        let response = self
            .client
            .post(self.api_url(&format!("models/{model}:generateContent")))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let response = check_status(response).await?;

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))
    }

    /// List every model visible to the configured key, following pagination
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    #[instrument(skip(self))]
    pub async fn list_model_info(&self) -> Result<Vec<ModelInfo>, InferenceError> {
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(self.api_url("models"))
                .header(API_KEY_HEADER, &self.config.api_key);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| self.map_transport_error(e))?;
            let page: ListModelsResponse = check_status(response)
                .await?
                .json()
                .await
                .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

            models.extend(page.models);
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(count = models.len(), "Listed models");
        Ok(models)
    }

    /// Configured request timeout, if any
    pub const fn timeout_ms(&self) -> Option<u64> {
        self.config.timeout_ms
    }

    fn map_transport_error(&self, err: reqwest::Error) -> InferenceError {
        if err.is_timeout() {
            InferenceError::Timeout(self.config.timeout_ms.unwrap_or_default())
        } else {
            InferenceError::from(err)
        }
    }
}

/// Turn a non-2xx response into the matching error
async fn check_status(response: Response) -> Result<Response, InferenceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let envelope: Option<ErrorEnvelope> = serde_json::from_str(&body).ok();
    let message = envelope
        .as_ref()
        .map_or_else(|| body.clone(), |e| e.error.message.clone());

    warn!(status = %status, message = %message, "Gemini request failed");

    let auth_failure = envelope.as_ref().is_some_and(|e| e.error.is_auth_failure());
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => InferenceError::Unauthorized(message),
        _ if auth_failure => InferenceError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => InferenceError::RateLimited,
        StatusCode::NOT_FOUND => InferenceError::ModelNotAvailable(message),
        s if s.is_server_error() => InferenceError::ServerError(format!("Status {s}: {message}")),
        s => InferenceError::RequestFailed(format!("Status {s}: {message}")),
    })
}

#[async_trait]
impl InferenceEngine for GeminiInferenceEngine {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request), prompt_chars = request.prompt.chars().count()))]
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError> {
        let model = self.resolve_model(&request).to_string();

        let body = GenerateContentRequest::text(request.prompt.as_str()).with_config(
            GenerationConfig {
                temperature: Some(request.temperature.unwrap_or(self.config.temperature)),
                max_output_tokens: Some(request.max_tokens.unwrap_or(self.config.max_tokens)),
                ..Default::default()
            },
        );

        let response = self.generate_content(&model, &body).await?;
        let content = response.text().ok_or(InferenceError::EmptyResponse)?;

        let usage = response.usage_metadata.as_ref().map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        debug!(tokens = ?usage, "Inference completed");

        Ok(InferenceResponse {
            content,
            model: response.model_version.clone().unwrap_or(model),
            usage,
            finish_reason: response.finish_reason().map(str::to_string),
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, InferenceError> {
        match self.list_model_info().await {
            Ok(_) => Ok(true),
            Err(e) if e.is_transport() => Ok(false),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    async fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        Ok(self
            .list_model_info()
            .await?
            .iter()
            .map(|m| m.short_name().to_string())
            .collect())
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
