//! Recognition adapter - Implements RecognitionPort over any `SpeechToText`

use std::sync::Arc;

use ai_speech::{
    AudioData, AudioEncoding, AudioFormat, CloudSpeechProvider, GeminiSttProvider,
    RecognitionConfig, SpeechConfig, SpeechToText, SttProvider,
};
use application::{
    error::ApplicationError,
    ports::{RecognitionEncoding, RecognitionPort, RecognitionSettings},
};
use async_trait::async_trait;
use domain::AudioContainer;
use tracing::{debug, instrument};

use super::map_speech_error;

/// Adapter for the configured speech-to-text backend
#[derive(Clone)]
pub struct RecognitionAdapter {
    provider: Arc<dyn SpeechToText>,
}

impl std::fmt::Debug for RecognitionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecognitionAdapter")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

impl RecognitionAdapter {
    /// Build the backend selected by `config.stt_provider`
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the backend's credentials are
    /// missing or cannot be parsed.
    pub fn from_config(config: &SpeechConfig) -> Result<Self, ApplicationError> {
        let provider: Arc<dyn SpeechToText> = match config.stt_provider {
            SttProvider::CloudSpeech => {
                Arc::new(CloudSpeechProvider::new(config).map_err(map_speech_error)?)
            },
            SttProvider::Gemini => {
                Arc::new(GeminiSttProvider::new(config).map_err(map_speech_error)?)
            },
        };
        Ok(Self { provider })
    }

    /// Wrap an existing provider
    pub fn new(provider: Arc<dyn SpeechToText>) -> Self {
        Self { provider }
    }

    /// Convert application settings to the vendor's recognition config
    fn recognition_config(settings: &RecognitionSettings) -> RecognitionConfig {
        RecognitionConfig {
            encoding: match settings.encoding {
                RecognitionEncoding::Linear16 => AudioEncoding::Linear16,
                RecognitionEncoding::OggOpus => AudioEncoding::OggOpus,
            },
            sample_rate_hertz: settings.sample_rate_hertz,
            language_code: settings.language_code.clone(),
            audio_channel_count: settings.channel_count,
            model: settings.model.clone(),
            use_enhanced: settings.use_enhanced,
            profanity_filter: settings.profanity_filter,
            enable_automatic_punctuation: settings.automatic_punctuation,
            enable_word_time_offsets: settings.word_time_offsets,
        }
    }

    /// Streams declared as WAV carry bare PCM frames
    const fn audio_format(container: AudioContainer) -> AudioFormat {
        match container {
            AudioContainer::Wav => AudioFormat::Pcm,
            AudioContainer::Ogg => AudioFormat::Ogg,
        }
    }
}

#[async_trait]
impl RecognitionPort for RecognitionAdapter {
    #[instrument(skip(self, audio, settings), fields(backend = self.provider.provider_name(), bytes = audio.len()))]
    async fn recognize(
        &self,
        audio: Vec<u8>,
        settings: RecognitionSettings,
    ) -> Result<String, ApplicationError> {
        let config = Self::recognition_config(&settings);
        let audio = AudioData::new(audio, Self::audio_format(settings.container))
            .with_sample_rate(settings.sample_rate_hertz);

        let transcription = self
            .provider
            .recognize(audio, &config)
            .await
            .map_err(map_speech_error)?;

        debug!(
            confidence = ?transcription.confidence,
            language = ?transcription.language,
            "Recognition complete"
        );
        Ok(transcription.text)
    }

    fn backend_name(&self) -> &'static str {
        self.provider.provider_name()
    }
}

#[cfg(test)]
mod tests {
    use ai_speech::{SpeechError, Transcription};
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingProvider {
        seen: Mutex<Option<(AudioFormat, Option<u32>, RecognitionConfig)>>,
    }

    #[async_trait]
    impl SpeechToText for RecordingProvider {
        async fn recognize(
            &self,
            audio: AudioData,
            config: &RecognitionConfig,
        ) -> Result<Transcription, SpeechError> {
            *self.seen.lock() = Some((audio.format(), audio.sample_rate(), config.clone()));
            Ok(Transcription::new("hello"))
        }

        fn provider_name(&self) -> &'static str {
            "recording"
        }
    }

    fn settings(container: AudioContainer, encoding: RecognitionEncoding) -> RecognitionSettings {
        RecognitionSettings {
            container,
            encoding,
            sample_rate_hertz: 16_000,
            channel_count: 1,
            language_code: "de-DE".into(),
            model: "latest_short".into(),
            use_enhanced: false,
            profanity_filter: true,
            automatic_punctuation: true,
            word_time_offsets: false,
        }
    }

    #[tokio::test]
    async fn wav_streams_are_sent_as_linear16_pcm() {
        let provider = Arc::new(RecordingProvider::default());
        let adapter = RecognitionAdapter::new(Arc::clone(&provider) as Arc<dyn SpeechToText>);

        let text = adapter
            .recognize(
                vec![0; 8],
                settings(AudioContainer::Wav, RecognitionEncoding::Linear16),
            )
            .await
            .unwrap();
        assert_eq!(text, "hello");
        assert_eq!(adapter.backend_name(), "recording");

        let (format, rate, config) = provider.seen.lock().clone().unwrap();
        assert_eq!(format, AudioFormat::Pcm);
        assert_eq!(rate, Some(16_000));
        assert_eq!(config.encoding, AudioEncoding::Linear16);
        assert_eq!(config.language_code, "de-DE");
        assert_eq!(config.model, "latest_short");
        assert!(!config.use_enhanced);
        assert!(config.profanity_filter);
    }

    #[tokio::test]
    async fn ogg_streams_are_sent_as_opus() {
        let provider = Arc::new(RecordingProvider::default());
        let adapter = RecognitionAdapter::new(Arc::clone(&provider) as Arc<dyn SpeechToText>);

        adapter
            .recognize(
                vec![1; 8],
                settings(AudioContainer::Ogg, RecognitionEncoding::OggOpus),
            )
            .await
            .unwrap();

        let (format, _, config) = provider.seen.lock().clone().unwrap();
        assert_eq!(format, AudioFormat::Ogg);
        assert_eq!(config.encoding, AudioEncoding::OggOpus);
    }

    #[test]
    fn cloud_backend_needs_credentials() {
        let err = RecognitionAdapter::from_config(&SpeechConfig::default()).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn gemini_backend_uses_api_key() {
        let config = SpeechConfig {
            stt_provider: SttProvider::Gemini,
            gemini_api_key: Some("AIza-test".into()),
            ..SpeechConfig::default()
        };
        let adapter = RecognitionAdapter::from_config(&config).unwrap();
        assert_eq!(adapter.backend_name(), "gemini");
    }
}
