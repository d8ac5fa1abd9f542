//! Gemini speech synthesis
//!
//! Sends the (already styled) text to `generateContent` with an AUDIO
//! response modality and a prebuilt voice. The response carries base64
//! encoded 24 kHz mono 16-bit PCM in the first part's inline data.

use ai_core::gemini::types::{GenerateContentRequest, GenerationConfig};
use ai_core::{GeminiInferenceEngine, InferenceConfig};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use domain::catalog::{AUDIO_SAMPLE_RATE, VOICES};
use tracing::{debug, instrument};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat, SynthesisRequest, VoiceInfo};

/// Gemini prebuilt-voice synthesis provider
#[derive(Debug, Clone)]
pub struct GeminiTtsProvider {
    engine: GeminiInferenceEngine,
    config: SpeechConfig,
}

impl GeminiTtsProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the API key is missing or the
    /// configuration is otherwise invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or_else(|| SpeechError::Configuration("Gemini API key is required".to_string()))?;

        let engine = GeminiInferenceEngine::new(InferenceConfig {
            api_key,
            base_url: config.gemini_base_url.clone(),
            default_model: config.tts_model.clone(),
            timeout_ms: config.timeout_ms,
            ..InferenceConfig::default()
        })?;

        Ok(Self { engine, config })
    }
}

#[async_trait]
impl TextToSpeech for GeminiTtsProvider {
    #[instrument(skip(self, request), fields(text_len = request.text.len(), voice = ?request.voice, model = ?request.model))]
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioData, SpeechError> {
        let model = request.model.as_deref().unwrap_or(&self.config.tts_model);
        let voice = request
            .voice
            .as_deref()
            .unwrap_or(&self.config.default_voice);

        let body = GenerateContentRequest::text(request.text.as_str())
            .with_config(GenerationConfig::audio(voice));

        let response = self.engine.generate_content(model, &body).await?;

        let blob = response
            .first_inline_data()
            .filter(|b| !b.data.is_empty())
            .ok_or(SpeechError::NoAudioData)?;

        let pcm = STANDARD
            .decode(blob.data.as_bytes())
            .map_err(|e| SpeechError::InvalidResponse(format!("Audio is not valid base64: {e}")))?;

        debug!(bytes = pcm.len(), mime_type = %blob.mime_type, "Synthesis complete");

        Ok(AudioData::new(pcm, AudioFormat::Pcm).with_sample_rate(AUDIO_SAMPLE_RATE))
    }

    fn list_voices(&self) -> Vec<VoiceInfo> {
        VOICES
            .iter()
            .map(|(id, description)| VoiceInfo::new(id, description))
            .collect()
    }

    fn model_name(&self) -> &str {
        &self.config.tts_model
    }

    fn default_voice(&self) -> &str {
        &self.config.default_voice
    }
}
