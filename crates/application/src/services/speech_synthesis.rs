//! Speech synthesis service - Styled Gemini TTS returning WAV
//!
//! Flow per request:
//! 1. Clip the message to the maximum text length
//! 2. Resolve voice, style, emotion and pace (per-call option, else setting)
//! 3. Prefix the message with a style instruction when not neutral
//! 4. Synthesize on a separate task, falling back to the default voice
//! 5. Frame the PCM as WAV, returning the raw bytes if framing fails

use std::{fmt, sync::Arc};

use domain::catalog::{DEFAULT_VOICE, MAX_TEXT_LENGTH, TTS_LANGUAGES, VOICES};
use domain::{OptionKey, OptionsMap, VoiceSelection, truncate_message};
#[cfg(test)]
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{SynthesisInput, SynthesisPort},
    services::{OptionsStore, dispatch::run_detached},
};

/// Option keys accepted per call
pub const SUPPORTED_TTS_OPTIONS: &[&str] = &[
    OptionKey::Voice.as_str(),
    OptionKey::Style.as_str(),
    OptionKey::Emotion.as_str(),
    OptionKey::Pace.as_str(),
    OptionKey::Language.as_str(),
    OptionKey::Streaming.as_str(),
];

/// Synthesized audio handed back to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsAudio {
    /// File extension of `data`
    pub format: &'static str,
    pub data: Vec<u8>,
}

/// Text-to-speech entity logic
pub struct SpeechSynthesisService {
    synthesis: Arc<dyn SynthesisPort>,
    options: Arc<OptionsStore>,
}

impl fmt::Debug for SpeechSynthesisService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechSynthesisService")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl SpeechSynthesisService {
    /// Create a new synthesis service
    pub fn new(synthesis: Arc<dyn SynthesisPort>, options: Arc<OptionsStore>) -> Self {
        Self { synthesis, options }
    }

    /// Configured default language
    pub fn default_language(&self) -> String {
        self.options.effective().language
    }

    /// Languages the TTS entity advertises
    pub const fn supported_languages(&self) -> &'static [&'static str] {
        TTS_LANGUAGES
    }

    /// Option keys accepted per call
    pub const fn supported_options(&self) -> &'static [&'static str] {
        SUPPORTED_TTS_OPTIONS
    }

    /// Defaults for every supported option, taken from the settings
    pub fn default_options(&self) -> OptionsMap {
        let settings = self.options.effective();
        let mut defaults = OptionsMap::new();
        for key in SUPPORTED_TTS_OPTIONS {
            if let Some(option) = OptionKey::from_key(key) {
                defaults.insert((*key).to_string(), settings.get(option));
            }
        }
        defaults
    }

    /// Synthesize `message` and return it as a WAV file
    ///
    /// # Errors
    ///
    /// Vendor failures and a response without audio are returned as errors.
    #[instrument(skip(self, message, options), fields(message_len = message.len(), language = ?language))]
    pub async fn get_tts_audio(
        &self,
        message: &str,
        language: Option<&str>,
        options: &OptionsMap,
    ) -> Result<TtsAudio, ApplicationError> {
        let settings = self.options.effective();

        let (message, clipped) = truncate_message(message, MAX_TEXT_LENGTH);
        if clipped {
            warn!(
                max_chars = MAX_TEXT_LENGTH,
                "Message too long, truncating"
            );
        }

        let selection = VoiceSelection::from_settings(&settings).overlay(options);
        let text = selection.speech_style().enhance(&message);
        let voice = checked_voice(&selection.voice);

        debug!(
            voice = %voice,
            style = %selection.style,
            emotion = %selection.emotion,
            pace = %selection.pace,
            multi_speaker = options.get("multi_speaker").is_some_and(|v| v == &serde_json::Value::Bool(true)),
            "Generating speech"
        );

        let input = SynthesisInput {
            text,
            voice,
            model: settings.model,
        };
        let synthesis = Arc::clone(&self.synthesis);
        let pcm = run_detached(async move { synthesis.synthesize(input).await }).await?;

        if pcm.is_empty() {
            return Err(ApplicationError::NoAudioData);
        }

        let data = match self.synthesis.frame_wav(&pcm) {
            Ok(wav) => wav,
            Err(e) => {
                warn!(error = %e, "Error converting audio to WAV format, returning raw audio");
                pcm
            },
        };

        info!(bytes = data.len(), "Speech synthesized");
        Ok(TtsAudio {
            format: "wav",
            data,
        })
    }
}

fn checked_voice(voice: &str) -> String {
    if VOICES.contains(voice) {
        voice.to_string()
    } else {
        warn!(voice = %voice, fallback = DEFAULT_VOICE, "Unknown voice, using default");
        DEFAULT_VOICE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ports::MockSynthesisPort;

    fn map(value: Value) -> OptionsMap {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("options must be an object"),
        }
    }

    fn service(mock: MockSynthesisPort, stored: Value) -> SpeechSynthesisService {
        SpeechSynthesisService::new(Arc::new(mock), Arc::new(OptionsStore::new(&map(stored))))
    }

    fn framing_mock() -> MockSynthesisPort {
        let mut mock = MockSynthesisPort::new();
        mock.expect_frame_wav().returning(|pcm| {
            let mut wav = b"RIFF".to_vec();
            wav.extend_from_slice(pcm);
            Ok(wav)
        });
        mock
    }

    #[tokio::test]
    async fn neutral_message_is_sent_verbatim_with_defaults() {
        let mut mock = framing_mock();
        mock.expect_synthesize()
            .withf(|input| {
                input.text == "Hello"
                    && input.voice == "Puck"
                    && input.model == "gemini-2.5-flash-preview-tts"
            })
            .times(1)
            .returning(|_| Ok(vec![1, 2]));

        let audio = service(mock, json!({}))
            .get_tts_audio("Hello", Some("en"), &OptionsMap::new())
            .await
            .unwrap();

        assert_eq!(audio.format, "wav");
        assert_eq!(audio.data, b"RIFF\x01\x02".to_vec());
    }

    #[tokio::test]
    async fn per_call_options_override_settings() {
        let mut mock = framing_mock();
        mock.expect_synthesize()
            .withf(|input| {
                input.text == "Say in a whisper, calmly, slowly: Goodnight" && input.voice == "Kore"
            })
            .times(1)
            .returning(|_| Ok(vec![0; 4]));

        let svc = service(mock, json!({"voice": "Zephyr", "style": "dramatic"}));
        let options = map(json!({"voice": "Kore", "style": "whisper", "emotion": "calm", "pace": "slow"}));
        svc.get_tts_audio("Goodnight", None, &options).await.unwrap();
    }

    #[tokio::test]
    async fn stored_style_applies_without_call_options() {
        let mut mock = framing_mock();
        mock.expect_synthesize()
            .withf(|input| input.text == "Say dramatically: Welcome" && input.voice == "Zephyr")
            .times(1)
            .returning(|_| Ok(vec![0; 2]));

        let svc = service(mock, json!({"voice": "Zephyr", "style": "dramatic"}));
        svc.get_tts_audio("Welcome", None, &OptionsMap::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_voice_falls_back_to_default() {
        let mut mock = framing_mock();
        mock.expect_synthesize()
            .withf(|input| input.voice == "Puck")
            .times(1)
            .returning(|_| Ok(vec![0; 2]));

        service(mock, json!({}))
            .get_tts_audio("Hi", None, &map(json!({"voice": "Nobody"})))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn long_message_is_clipped() {
        let mut mock = framing_mock();
        mock.expect_synthesize()
            .withf(|input| input.text.chars().count() == MAX_TEXT_LENGTH)
            .times(1)
            .returning(|_| Ok(vec![0; 2]));

        let message = "a".repeat(MAX_TEXT_LENGTH + 500);
        service(mock, json!({}))
            .get_tts_audio(&message, None, &OptionsMap::new())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn framing_failure_returns_raw_pcm() {
        let mut mock = MockSynthesisPort::new();
        mock.expect_synthesize().returning(|_| Ok(vec![9, 8, 7]));
        mock.expect_frame_wav()
            .returning(|_| Err(ApplicationError::Speech("too large".into())));

        let audio = service(mock, json!({}))
            .get_tts_audio("Hi", None, &OptionsMap::new())
            .await
            .unwrap();
        assert_eq!(audio.data, vec![9, 8, 7]);
    }

    #[tokio::test]
    async fn vendor_error_propagates() {
        let mut mock = MockSynthesisPort::new();
        mock.expect_synthesize()
            .returning(|_| Err(ApplicationError::NoAudioData));
        mock.expect_frame_wav().never();

        let err = service(mock, json!({}))
            .get_tts_audio("Hi", None, &OptionsMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NoAudioData));
    }

    #[tokio::test]
    async fn empty_audio_is_an_error() {
        let mut mock = MockSynthesisPort::new();
        mock.expect_synthesize().returning(|_| Ok(Vec::new()));

        let err = service(mock, json!({}))
            .get_tts_audio("Hi", None, &OptionsMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NoAudioData));
    }

    #[test]
    fn entity_properties_follow_settings() {
        let svc = service(
            MockSynthesisPort::new(),
            json!({"language": "de", "voice": "Kore", "streaming": false}),
        );

        assert_eq!(svc.default_language(), "de");
        assert_eq!(svc.supported_languages().len(), 10);
        assert_eq!(
            svc.supported_options(),
            &["voice", "style", "emotion", "pace", "language", "streaming"]
        );

        let defaults = svc.default_options();
        assert_eq!(defaults.get("voice"), Some(&json!("Kore")));
        assert_eq!(defaults.get("style"), Some(&json!("natural")));
        assert_eq!(defaults.get("emotion"), Some(&json!("neutral")));
        assert_eq!(defaults.get("pace"), Some(&json!("normal")));
        assert_eq!(defaults.get("language"), Some(&json!("de")));
        assert_eq!(defaults.get("streaming"), Some(&json!(false)));
    }
}
