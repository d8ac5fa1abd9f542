//! Gemini-based recognition
//!
//! Sends the buffered recording as an inline audio part alongside a fixed
//! transcription instruction. Needs only the Generative Language API key.

use ai_core::gemini::types::{Content, GenerateContentRequest, GenerationConfig, Part};
use ai_core::{GeminiInferenceEngine, InferenceConfig, InferenceError};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use tracing::{debug, instrument};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::SpeechToText;
use crate::types::{AudioData, AudioEncoding, AudioFormat, RecognitionConfig, Transcription};
use crate::wav::{WavSpec, wrap_pcm};

/// Instruction sent with every recording
pub const TRANSCRIPTION_PROMPT: &str = "Generate a transcript of the speech in this audio. \
Return only the spoken words, without timestamps, speaker labels or commentary.";

/// Recognition through a multimodal Gemini model
#[derive(Debug, Clone)]
pub struct GeminiSttProvider {
    engine: GeminiInferenceEngine,
    model: String,
}

impl GeminiSttProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the API key is missing.
    pub fn new(config: &SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or_else(|| SpeechError::Configuration("Gemini API key is required".to_string()))?;

        let engine = GeminiInferenceEngine::new(InferenceConfig {
            api_key,
            base_url: config.gemini_base_url.clone(),
            default_model: config.gemini_stt_model.clone(),
            timeout_ms: config.timeout_ms,
            ..InferenceConfig::default()
        })?;

        Ok(Self {
            engine,
            model: config.gemini_stt_model.clone(),
        })
    }

    /// MIME type and bytes for the inline part; bare LINEAR16 is framed as WAV
    fn inline_payload(
        audio: &AudioData,
        config: &RecognitionConfig,
    ) -> Result<(&'static str, Bytes), SpeechError> {
        match (audio.format(), config.encoding) {
            (AudioFormat::Pcm, AudioEncoding::Linear16) => {
                let spec = WavSpec {
                    sample_rate: config.sample_rate_hertz,
                    channels: u16::from(config.audio_channel_count),
                    bits_per_sample: 16,
                };
                Ok(("audio/wav", wrap_pcm(audio.data(), spec)?))
            },
            (AudioFormat::Pcm, encoding) => Ok((
                encoding.mime_type(),
                Bytes::copy_from_slice(audio.data()),
            )),
            (other, _) => Ok((other.mime_type(), Bytes::copy_from_slice(audio.data()))),
        }
    }
}

#[async_trait]
impl SpeechToText for GeminiSttProvider {
    #[instrument(skip(self, audio, config), fields(audio_size = audio.size_bytes(), model = %self.model))]
    async fn recognize(
        &self,
        audio: AudioData,
        config: &RecognitionConfig,
    ) -> Result<Transcription, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("Audio data is empty".to_string()));
        }

        let (mime_type, payload) = Self::inline_payload(&audio, config)?;
        let body = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::text(TRANSCRIPTION_PROMPT),
                Part::inline(mime_type, STANDARD.encode(&payload)),
            ])],
            generation_config: Some(GenerationConfig {
                temperature: Some(0.0),
                ..Default::default()
            }),
        };

        let response = match self.engine.generate_content(&self.model, &body).await {
            Ok(response) => response,
            Err(InferenceError::EmptyResponse) => return Ok(Transcription::new("")),
            Err(e) => return Err(e.into()),
        };

        let text = response.text().unwrap_or_default();
        debug!(text_len = text.len(), "Transcription complete");

        Ok(Transcription::new(text.trim()).with_language(config.language_code.clone()))
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
