//! Port definitions for speech processing
//!
//! Defines the traits (ports) that speech processing adapters must implement.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, RecognitionConfig, SynthesisRequest, Transcription, VoiceInfo};

/// Port for Speech-to-Text (STT) implementations
///
/// Implementations receive a fully buffered recording and return the best
/// transcript the backend produced.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Recognize speech in `audio`
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the backend rejects the request or answers
    /// with something that cannot be decoded. An empty result is not an error;
    /// it yields a blank [`Transcription`].
    async fn recognize(
        &self,
        audio: AudioData,
        config: &RecognitionConfig,
    ) -> Result<Transcription, SpeechError>;

    /// Backend identifier used in logs
    fn provider_name(&self) -> &'static str;
}

/// Port for Text-to-Speech (TTS) implementations
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Convert text to speech
    ///
    /// Returns raw PCM; framing it for playback is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if synthesis fails or the response has no audio.
    async fn synthesize(&self, request: SynthesisRequest) -> Result<AudioData, SpeechError>;

    /// List available voices
    fn list_voices(&self) -> Vec<VoiceInfo>;

    /// Get the name of the default TTS model
    fn model_name(&self) -> &str;

    /// Get the default voice ID
    fn default_voice(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AudioFormat;

    /// Mock implementation for testing
    struct MockSpeechToText;

    #[async_trait]
    impl SpeechToText for MockSpeechToText {
        async fn recognize(
            &self,
            _audio: AudioData,
            config: &RecognitionConfig,
        ) -> Result<Transcription, SpeechError> {
            Ok(Transcription::new("Mock transcription").with_language(config.language_code.clone()))
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }

    struct MockTextToSpeech {
        voice: String,
    }

    #[async_trait]
    impl TextToSpeech for MockTextToSpeech {
        async fn synthesize(&self, _request: SynthesisRequest) -> Result<AudioData, SpeechError> {
            Ok(AudioData::new(vec![0, 1, 2, 3], AudioFormat::Pcm))
        }

        fn list_voices(&self) -> Vec<VoiceInfo> {
            vec![VoiceInfo::new("Puck", "Upbeat")]
        }

        fn model_name(&self) -> &str {
            "mock-tts"
        }

        fn default_voice(&self) -> &str {
            &self.voice
        }
    }

    #[tokio::test]
    async fn mock_stt_recognizes() {
        let stt = MockSpeechToText;
        let audio = AudioData::new(vec![0, 1, 2], AudioFormat::Wav);

        let result = stt.recognize(audio, &RecognitionConfig::default()).await.unwrap();
        assert_eq!(result.text, "Mock transcription");
        assert_eq!(result.language.as_deref(), Some("en-US"));
        assert_eq!(stt.provider_name(), "mock");
    }

    #[tokio::test]
    async fn mock_tts_synthesizes() {
        let tts = MockTextToSpeech {
            voice: "Puck".to_string(),
        };

        let audio = tts.synthesize(SynthesisRequest::new("Hello")).await.unwrap();
        assert_eq!(audio.format(), AudioFormat::Pcm);
        assert_eq!(tts.default_voice(), "Puck");
        assert_eq!(tts.list_voices().len(), 1);
    }

    #[test]
    fn ports_are_object_safe() {
        fn assert_stt(_: &dyn SpeechToText) {}
        fn assert_tts(_: &dyn TextToSpeech) {}
        assert_stt(&MockSpeechToText);
        assert_tts(&MockTextToSpeech {
            voice: String::new(),
        });
    }
}
