//! Speech synthesis adapter - Implements SynthesisPort using ai_speech

use ai_speech::{
    GeminiTtsProvider, SpeechConfig, SynthesisRequest, TextToSpeech,
    wav::{WavSpec, wrap_pcm},
};
use application::{
    error::ApplicationError,
    ports::{SynthesisInput, SynthesisPort},
};
use async_trait::async_trait;
use tracing::{debug, instrument};

use super::map_speech_error;

/// Adapter for Gemini prebuilt-voice synthesis
#[derive(Debug, Clone)]
pub struct SpeechSynthesisAdapter {
    provider: GeminiTtsProvider,
    spec: WavSpec,
}

impl SpeechSynthesisAdapter {
    /// Create a new speech synthesis adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the config is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let provider = GeminiTtsProvider::new(config).map_err(map_speech_error)?;
        Ok(Self {
            provider,
            spec: WavSpec::gemini_tts(),
        })
    }
}

#[async_trait]
impl SynthesisPort for SpeechSynthesisAdapter {
    #[instrument(skip(self, input), fields(voice = %input.voice, model = %input.model))]
    async fn synthesize(&self, input: SynthesisInput) -> Result<Vec<u8>, ApplicationError> {
        let request = SynthesisRequest::new(input.text)
            .with_voice(input.voice)
            .with_model(input.model);

        let audio = self
            .provider
            .synthesize(request)
            .await
            .map_err(map_speech_error)?;

        debug!(bytes = audio.size_bytes(), format = ?audio.format(), "Synthesis complete");
        Ok(audio.into_data())
    }

    fn frame_wav(&self, pcm: &[u8]) -> Result<Vec<u8>, ApplicationError> {
        wrap_pcm(pcm, self.spec)
            .map(|wav| wav.to_vec())
            .map_err(map_speech_error)
    }
}
