//! Google Cloud Speech-to-Text provider
//!
//! Uses the synchronous `speech:recognize` REST method with a bearer token
//! minted from service-account credentials.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::auth::{ServiceAccountCredentials, ServiceAccountTokenProvider};
use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::SpeechToText;
use crate::types::{AudioData, RecognitionConfig, Transcription};

/// Cloud Speech recognition provider
#[derive(Debug)]
pub struct CloudSpeechProvider {
    client: Client,
    base_url: String,
    project_id: Option<String>,
    tokens: ServiceAccountTokenProvider,
}

impl CloudSpeechProvider {
    /// Create a provider from configuration
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` when credentials are missing, the
    /// credentials JSON cannot be parsed, or its private key is unusable.
    pub fn new(config: &SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        let json = config
            .stt_credentials_json
            .as_deref()
            .ok_or_else(|| SpeechError::Configuration("STT credentials are required".into()))?;
        let creds = ServiceAccountCredentials::from_json(json)?;

        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            tokens: ServiceAccountTokenProvider::new(creds, client.clone()),
            client,
            base_url: config.stt_base_url.trim_end_matches('/').to_string(),
            project_id: config.stt_project_id.clone(),
        })
    }

    fn recognize_url(&self) -> String {
        format!("{}/speech:recognize", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    config: &'a RecognitionConfig,
    audio: RecognitionAudio,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
    #[serde(default)]
    language_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    confidence: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

#[async_trait]
impl SpeechToText for CloudSpeechProvider {
    #[instrument(skip(self, audio, config), fields(audio_size = audio.size_bytes(), encoding = ?config.encoding, sample_rate = config.sample_rate_hertz))]
    async fn recognize(
        &self,
        audio: AudioData,
        config: &RecognitionConfig,
    ) -> Result<Transcription, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("Audio data is empty".to_string()));
        }

        let token = self.tokens.access_token().await?;
        let body = RecognizeRequest {
            config,
            audio: RecognitionAudio {
                content: STANDARD.encode(audio.data()),
            },
        };

        let mut request = self
            .client
            .post(self.recognize_url())
            .bearer_auth(token)
            .json(&body);
        if let Some(project) = &self.project_id {
            request = request.header("x-goog-user-project", project);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&error_body)
                .map(|e| e.error.message)
                .unwrap_or(error_body);
            warn!(status = %status, message = %message, "Recognition request failed");

            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => SpeechError::RateLimited,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    SpeechError::Authentication(message)
                },
                _ => SpeechError::TranscriptionFailed(format!("HTTP {status}: {message}")),
            });
        }

        let parsed: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let Some(first) = parsed.results.into_iter().next() else {
            warn!("No transcription results returned");
            return Ok(Transcription::new(""));
        };
        let language = first.language_code;
        let Some(best) = first.alternatives.into_iter().next() else {
            warn!("Recognition result has no alternatives");
            return Ok(Transcription::new(""));
        };

        debug!(text_len = best.transcript.len(), "Transcription complete");

        let mut transcription = Transcription::new(best.transcript.trim());
        if let Some(language) = language {
            transcription = transcription.with_language(language);
        }
        if let Some(confidence) = best.confidence {
            transcription = transcription.with_confidence(confidence);
        }
        Ok(transcription)
    }

    fn provider_name(&self) -> &'static str {
        "cloud_speech"
    }
}
