//! Options flow - Menu of settings screens

use domain::catalog::{
    EMOTIONS, MODELS, PACE_OPTIONS, SPEECH_STYLES, STT_MODELS, STT_SAMPLE_RATES,
    STT_SUPPORTED_LANGUAGES, SUPPORTED_LANGUAGES, TTS_QUALITY_OPTIONS, VOICES,
};
use domain::{EffectiveSettings, OptionKey, OptionsMap, retain_recognized};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::form::{FieldKind, FormField};

/// Screens of the options menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionsStep {
    General,
    Conversation,
    Tts,
    Stt,
}

impl OptionsStep {
    /// Menu entries in display order
    pub const MENU: [Self; 4] = [Self::General, Self::Conversation, Self::Tts, Self::Stt];

    /// Step identifier
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Conversation => "conversation",
            Self::Tts => "tts",
            Self::Stt => "stt",
        }
    }

    /// Keys edited on this screen
    pub const fn keys(self) -> &'static [OptionKey] {
        match self {
            Self::General => &[
                OptionKey::Language,
                OptionKey::Streaming,
                OptionKey::MultiSpeaker,
            ],
            Self::Conversation => &[
                OptionKey::ConversationModel,
                OptionKey::ConversationTemperature,
                OptionKey::ConversationMaxTokens,
                OptionKey::ConversationContextLength,
            ],
            Self::Tts => &[
                OptionKey::Model,
                OptionKey::Voice,
                OptionKey::Style,
                OptionKey::Emotion,
                OptionKey::Pace,
                OptionKey::TtsQuality,
            ],
            Self::Stt => &[
                OptionKey::SttLanguage,
                OptionKey::SttModel,
                OptionKey::SttUseEnhanced,
                OptionKey::SttProfanityFilter,
                OptionKey::SttPunctuation,
                OptionKey::SttSampleRate,
            ],
        }
    }

    /// Parse a step identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::MENU.into_iter().find(|step| step.as_str() == id)
    }
}

fn number(min: f64, max: f64, step: f64) -> FieldKind {
    FieldKind::Number { min, max, step }
}

/// Field description of one option key, pre-filled with `current`
fn field(key: OptionKey, current: Value) -> FormField {
    let name = key.as_str();
    match key {
        OptionKey::Model | OptionKey::ConversationModel => {
            FormField::catalog_select(name, MODELS, current)
        },
        OptionKey::Voice => FormField::catalog_select(name, VOICES, current),
        OptionKey::Language => FormField::catalog_select(name, SUPPORTED_LANGUAGES, current),
        OptionKey::SttLanguage => {
            FormField::catalog_select(name, STT_SUPPORTED_LANGUAGES, current)
        },
        OptionKey::SttModel => FormField::catalog_select(name, STT_MODELS, current),
        OptionKey::Style => FormField::plain_select(name, SPEECH_STYLES, current),
        OptionKey::Emotion => FormField::plain_select(name, EMOTIONS, current),
        OptionKey::Pace => FormField::plain_select(name, PACE_OPTIONS, current),
        OptionKey::TtsQuality => FormField::plain_select(name, TTS_QUALITY_OPTIONS, current),
        OptionKey::SttSampleRate => FormField::plain_select(name, STT_SAMPLE_RATES, current),
        OptionKey::Streaming
        | OptionKey::MultiSpeaker
        | OptionKey::SttUseEnhanced
        | OptionKey::SttProfanityFilter
        | OptionKey::SttPunctuation => FormField::optional(name, FieldKind::Boolean, current),
        OptionKey::ConversationTemperature => {
            FormField::optional(name, number(0.0, 2.0, 0.1), current)
        },
        OptionKey::ConversationMaxTokens => {
            FormField::optional(name, number(1.0, 8192.0, 1.0), current)
        },
        OptionKey::ConversationContextLength => {
            FormField::optional(name, number(1.0, 50.0, 1.0), current)
        },
    }
}

/// Options flow over the currently stored options
#[derive(Debug, Clone, Default)]
pub struct OptionsFlow {
    stored: OptionsMap,
}

impl OptionsFlow {
    /// Start a flow; unrecognised stored keys are dropped
    pub fn new(stored: &OptionsMap) -> Self {
        Self {
            stored: retain_recognized(stored),
        }
    }

    /// Menu entries
    pub const fn menu(&self) -> [OptionsStep; 4] {
        OptionsStep::MENU
    }

    /// Fields of `step`, each pre-filled with the effective value
    pub fn form(&self, step: OptionsStep) -> Vec<FormField> {
        let settings = EffectiveSettings::resolve(&self.stored);
        step.keys()
            .iter()
            .map(|key| field(*key, settings.get(*key)))
            .collect()
    }

    /// Merge a submitted screen into the stored options
    ///
    /// Keys that are not part of `step` or whose value the field does not
    /// accept are ignored. Returns the new stored options.
    pub fn submit(&mut self, step: OptionsStep, input: &OptionsMap) -> OptionsMap {
        let fields = self.form(step);
        for (key, value) in retain_recognized(input) {
            match fields.iter().find(|f| f.key == key) {
                Some(field) if field.accepts(&value) => {
                    self.stored.insert(key, value);
                },
                Some(_) => warn!(key = %key, value = %value, "Rejected option value"),
                None => debug!(key = %key, step = step.as_str(), "Option not on this screen"),
            }
        }
        self.stored.clone()
    }

    /// Stored options as they stand
    pub const fn stored(&self) -> &OptionsMap {
        &self.stored
    }
}
