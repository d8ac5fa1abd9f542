//! Effective settings - default table overlaid with user options
//!
//! Options are stored by the host as a loosely typed JSON mapping. Resolution
//! keeps only recognised keys and falls back to the default for any key that
//! is missing, `null`, or of the wrong type. Resolution is a pure function of
//! the two mappings; nothing is cached.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{
    DEFAULT_CONVERSATION_CONTEXT_LENGTH, DEFAULT_CONVERSATION_MAX_TOKENS,
    DEFAULT_CONVERSATION_TEMPERATURE, DEFAULT_EMOTION, DEFAULT_LANGUAGE,
    DEFAULT_MODEL_CONVERSATION, DEFAULT_MODEL_TTS, DEFAULT_PACE, DEFAULT_STREAMING,
    DEFAULT_STT_LANGUAGE, DEFAULT_STT_MODEL, DEFAULT_STT_SAMPLE_RATE, DEFAULT_STYLE,
    DEFAULT_TTS_QUALITY, DEFAULT_VOICE,
};
use crate::entities::SpeechStyle;

/// Loosely typed option mapping as persisted by the host
pub type OptionsMap = serde_json::Map<String, Value>;

/// Option keys understood by the integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Model,
    Voice,
    Style,
    Emotion,
    Pace,
    Language,
    Streaming,
    MultiSpeaker,
    TtsQuality,
    ConversationModel,
    ConversationTemperature,
    ConversationMaxTokens,
    ConversationContextLength,
    SttLanguage,
    SttModel,
    SttUseEnhanced,
    SttProfanityFilter,
    SttPunctuation,
    SttSampleRate,
}

impl OptionKey {
    /// Every recognised key
    pub const ALL: [Self; 19] = [
        Self::Model,
        Self::Voice,
        Self::Style,
        Self::Emotion,
        Self::Pace,
        Self::Language,
        Self::Streaming,
        Self::MultiSpeaker,
        Self::TtsQuality,
        Self::ConversationModel,
        Self::ConversationTemperature,
        Self::ConversationMaxTokens,
        Self::ConversationContextLength,
        Self::SttLanguage,
        Self::SttModel,
        Self::SttUseEnhanced,
        Self::SttProfanityFilter,
        Self::SttPunctuation,
        Self::SttSampleRate,
    ];

    /// Key as stored in the options mapping
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Voice => "voice",
            Self::Style => "style",
            Self::Emotion => "emotion",
            Self::Pace => "pace",
            Self::Language => "language",
            Self::Streaming => "streaming",
            Self::MultiSpeaker => "multi_speaker",
            Self::TtsQuality => "tts_quality",
            Self::ConversationModel => "conversation_model",
            Self::ConversationTemperature => "conversation_temperature",
            Self::ConversationMaxTokens => "conversation_max_tokens",
            Self::ConversationContextLength => "conversation_context_length",
            Self::SttLanguage => "stt_language",
            Self::SttModel => "stt_model",
            Self::SttUseEnhanced => "stt_use_enhanced",
            Self::SttProfanityFilter => "stt_profanity_filter",
            Self::SttPunctuation => "stt_punctuation",
            Self::SttSampleRate => "stt_sample_rate",
        }
    }

    /// Look up a key by its stored name
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl std::fmt::Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved settings for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveSettings {
    /// TTS model
    pub model: String,
    /// Default prebuilt voice
    pub voice: String,
    /// Default speaking style
    pub style: String,
    /// Default emotion
    pub emotion: String,
    /// Default pace
    pub pace: String,
    /// Default TTS language
    pub language: String,
    /// Streaming flag (stored only)
    pub streaming: bool,
    /// Multi-speaker flag (stored only)
    pub multi_speaker: bool,
    /// TTS quality tier (stored only)
    pub tts_quality: String,
    /// Conversation model
    pub conversation_model: String,
    /// Conversation sampling temperature
    pub conversation_temperature: f64,
    /// Conversation output token cap
    pub conversation_max_tokens: u32,
    /// Prior exchanges included in a prompt
    pub conversation_context_length: usize,
    /// Recognition language code
    pub stt_language: String,
    /// Recognition model
    pub stt_model: String,
    /// Use enhanced recognition models
    pub stt_use_enhanced: bool,
    /// Mask profanity in transcripts
    pub stt_profanity_filter: bool,
    /// Automatic punctuation in transcripts
    pub stt_punctuation: bool,
    /// Fallback sample rate when the stream does not declare one
    pub stt_sample_rate: u32,
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL_TTS.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            style: DEFAULT_STYLE.to_string(),
            emotion: DEFAULT_EMOTION.to_string(),
            pace: DEFAULT_PACE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            streaming: DEFAULT_STREAMING,
            multi_speaker: false,
            tts_quality: DEFAULT_TTS_QUALITY.to_string(),
            conversation_model: DEFAULT_MODEL_CONVERSATION.to_string(),
            conversation_temperature: DEFAULT_CONVERSATION_TEMPERATURE,
            conversation_max_tokens: DEFAULT_CONVERSATION_MAX_TOKENS,
            conversation_context_length: DEFAULT_CONVERSATION_CONTEXT_LENGTH,
            stt_language: DEFAULT_STT_LANGUAGE.to_string(),
            stt_model: DEFAULT_STT_MODEL.to_string(),
            stt_use_enhanced: true,
            stt_profanity_filter: false,
            stt_punctuation: true,
            stt_sample_rate: DEFAULT_STT_SAMPLE_RATE,
        }
    }
}

impl EffectiveSettings {
    /// Overlay user options onto the default table
    ///
    /// # Examples
    ///
    /// ```
    /// use domain::{EffectiveSettings, OptionsMap};
    ///
    /// let mut options = OptionsMap::new();
    /// options.insert("voice".into(), "Kore".into());
    /// options.insert("not_a_setting".into(), 1.into());
    ///
    /// let settings = EffectiveSettings::resolve(&options);
    /// assert_eq!(settings.voice, "Kore");
    /// assert!(!settings.to_options().contains_key("not_a_setting"));
    /// ```
    pub fn resolve(overrides: &OptionsMap) -> Self {
        let d = Self::default();
        Self {
            model: pick(overrides, OptionKey::Model, d.model),
            voice: pick(overrides, OptionKey::Voice, d.voice),
            style: pick(overrides, OptionKey::Style, d.style),
            emotion: pick(overrides, OptionKey::Emotion, d.emotion),
            pace: pick(overrides, OptionKey::Pace, d.pace),
            language: pick(overrides, OptionKey::Language, d.language),
            streaming: pick(overrides, OptionKey::Streaming, d.streaming),
            multi_speaker: pick(overrides, OptionKey::MultiSpeaker, d.multi_speaker),
            tts_quality: pick(overrides, OptionKey::TtsQuality, d.tts_quality),
            conversation_model: pick(overrides, OptionKey::ConversationModel, d.conversation_model),
            conversation_temperature: pick(
                overrides,
                OptionKey::ConversationTemperature,
                d.conversation_temperature,
            ),
            conversation_max_tokens: pick(
                overrides,
                OptionKey::ConversationMaxTokens,
                d.conversation_max_tokens,
            ),
            conversation_context_length: pick(
                overrides,
                OptionKey::ConversationContextLength,
                d.conversation_context_length,
            ),
            stt_language: pick(overrides, OptionKey::SttLanguage, d.stt_language),
            stt_model: pick(overrides, OptionKey::SttModel, d.stt_model),
            stt_use_enhanced: pick(overrides, OptionKey::SttUseEnhanced, d.stt_use_enhanced),
            stt_profanity_filter: pick(
                overrides,
                OptionKey::SttProfanityFilter,
                d.stt_profanity_filter,
            ),
            stt_punctuation: pick(overrides, OptionKey::SttPunctuation, d.stt_punctuation),
            stt_sample_rate: pick(overrides, OptionKey::SttSampleRate, d.stt_sample_rate),
        }
    }

    /// The default table as an options mapping
    pub fn default_table() -> OptionsMap {
        Self::default().to_options()
    }

    /// Render the settings as an options mapping keyed by [`OptionKey`]
    pub fn to_options(&self) -> OptionsMap {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => OptionsMap::new(),
        }
    }

    /// Value of a single key
    pub fn get(&self, key: OptionKey) -> Value {
        self.to_options()
            .remove(key.as_str())
            .unwrap_or(Value::Null)
    }

    /// Default voice, style, emotion and pace
    pub fn voice_selection(&self) -> VoiceSelection {
        VoiceSelection::from_settings(self)
    }
}

/// Keep only recognised keys of an options mapping
pub fn retain_recognized(options: &OptionsMap) -> OptionsMap {
    options
        .iter()
        .filter(|(key, _)| OptionKey::from_key(key).is_some())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn pick<T: DeserializeOwned>(overrides: &OptionsMap, key: OptionKey, default: T) -> T {
    match overrides.get(key.as_str()) {
        None | Some(Value::Null) => default,
        Some(value) => T::deserialize(value).unwrap_or(default),
    }
}

/// Voice and style for a single synthesis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSelection {
    pub voice: String,
    pub style: String,
    pub emotion: String,
    pub pace: String,
}

impl VoiceSelection {
    /// Selection taken from the resolved settings
    pub fn from_settings(settings: &EffectiveSettings) -> Self {
        Self {
            voice: settings.voice.clone(),
            style: settings.style.clone(),
            emotion: settings.emotion.clone(),
            pace: settings.pace.clone(),
        }
    }

    /// Replace fields with per-call options where present
    pub fn overlay(mut self, options: &OptionsMap) -> Self {
        let text = |key: OptionKey| options.get(key.as_str()).and_then(Value::as_str);

        if let Some(voice) = text(OptionKey::Voice) {
            self.voice = voice.to_string();
        }
        if let Some(style) = text(OptionKey::Style) {
            self.style = style.to_string();
        }
        if let Some(emotion) = text(OptionKey::Emotion) {
            self.emotion = emotion.to_string();
        }
        if let Some(pace) = text(OptionKey::Pace) {
            self.pace = pace.to_string();
        }
        self
    }

    /// Style, emotion and pace of this selection
    pub fn speech_style(&self) -> SpeechStyle {
        SpeechStyle::new(&self.style, &self.emotion, &self.pace)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn options(value: Value) -> OptionsMap {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test options must be an object"),
        }
    }

    #[test]
    fn empty_overrides_yield_defaults() {
        let settings = EffectiveSettings::resolve(&OptionsMap::new());
        assert_eq!(settings, EffectiveSettings::default());
        assert_eq!(settings.to_options(), EffectiveSettings::default_table());
    }

    #[test]
    fn overrides_replace_defaults() {
        let settings = EffectiveSettings::resolve(&options(json!({
            "voice": "Kore",
            "style": "whisper",
            "conversation_temperature": 0.2,
            "conversation_max_tokens": 256,
            "stt_sample_rate": 48000,
            "streaming": false,
        })));

        assert_eq!(settings.voice, "Kore");
        assert_eq!(settings.style, "whisper");
        assert!((settings.conversation_temperature - 0.2).abs() < f64::EPSILON);
        assert_eq!(settings.conversation_max_tokens, 256);
        assert_eq!(settings.stt_sample_rate, 48000);
        assert!(!settings.streaming);
        assert_eq!(settings.pace, "normal");
    }

    #[test]
    fn null_override_falls_back() {
        let settings = EffectiveSettings::resolve(&options(json!({ "voice": null })));
        assert_eq!(settings.voice, "Puck");
    }

    #[test]
    fn wrongly_typed_override_falls_back() {
        let settings = EffectiveSettings::resolve(&options(json!({
            "conversation_max_tokens": "lots",
            "conversation_context_length": -3,
            "streaming": "yes",
        })));

        assert_eq!(settings.conversation_max_tokens, 1000);
        assert_eq!(settings.conversation_context_length, 10);
        assert!(settings.streaming);
    }

    #[test]
    fn integer_temperature_is_accepted() {
        let settings =
            EffectiveSettings::resolve(&options(json!({ "conversation_temperature": 1 })));
        assert!((settings.conversation_temperature - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let settings = EffectiveSettings::resolve(&options(json!({
            "tts_model": "something",
            "favourite_colour": "blue",
        })));

        let rendered = settings.to_options();
        assert!(!rendered.contains_key("tts_model"));
        assert!(!rendered.contains_key("favourite_colour"));
        assert_eq!(settings, EffectiveSettings::default());
    }

    #[test]
    fn rendered_keys_match_option_keys() {
        let rendered = EffectiveSettings::default_table();
        assert_eq!(rendered.len(), OptionKey::ALL.len());
        for key in OptionKey::ALL {
            assert!(rendered.contains_key(key.as_str()), "missing {key}");
        }
    }

    #[test]
    fn get_returns_single_value() {
        let settings = EffectiveSettings::default();
        assert_eq!(settings.get(OptionKey::Voice), json!("Puck"));
        assert_eq!(settings.get(OptionKey::SttSampleRate), json!(16000));
    }

    #[test]
    fn option_key_round_trips_through_name() {
        for key in OptionKey::ALL {
            assert_eq!(OptionKey::from_key(key.as_str()), Some(key));
        }
        assert_eq!(OptionKey::from_key("speakers"), None);
    }

    #[test]
    fn retain_recognized_filters_keys() {
        let filtered = retain_recognized(&options(json!({
            "voice": "Kore",
            "speakers": ["A", "B"],
        })));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.get("voice"), Some(&json!("Kore")));
    }

    #[test]
    fn voice_selection_overlay() {
        let settings = EffectiveSettings::resolve(&options(json!({ "voice": "Kore" })));
        let selection = settings
            .voice_selection()
            .overlay(&options(json!({ "style": "dramatic", "pace": 3 })));

        assert_eq!(selection.voice, "Kore");
        assert_eq!(selection.style, "dramatic");
        assert_eq!(selection.emotion, "neutral");
        assert_eq!(selection.pace, "normal");
    }
}
