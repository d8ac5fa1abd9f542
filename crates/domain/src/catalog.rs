//! Static catalogs - voices, models, languages and speaking styles
//!
//! Every table is defined at compile time and never mutated. Lookups are
//! linear; the tables are small enough that a map would buy nothing.

/// Integration identifier, used as prefix for entity unique ids
pub const INTEGRATION_DOMAIN: &str = "gemini_ai_tts";

/// Default TTS model
pub const DEFAULT_MODEL_TTS: &str = "gemini-2.5-flash-preview-tts";
/// Default conversation model
pub const DEFAULT_MODEL_CONVERSATION: &str = "gemini-2.5-pro-preview-06-05";
/// Default prebuilt voice
pub const DEFAULT_VOICE: &str = "Puck";
/// Neutral speaking style
pub const DEFAULT_STYLE: &str = "natural";
/// Neutral emotion
pub const DEFAULT_EMOTION: &str = "neutral";
/// Neutral pace
pub const DEFAULT_PACE: &str = "normal";
/// Language used when nothing else is configured
pub const DEFAULT_LANGUAGE: &str = "auto";
/// Streaming flag default (stored but not acted upon)
pub const DEFAULT_STREAMING: bool = true;
/// Default TTS quality tier
pub const DEFAULT_TTS_QUALITY: &str = "standard";
/// Default recognition language
pub const DEFAULT_STT_LANGUAGE: &str = "en-US";
/// Default recognition model
pub const DEFAULT_STT_MODEL: &str = "latest_long";
/// Default recognition sample rate in Hz
pub const DEFAULT_STT_SAMPLE_RATE: u32 = 16_000;
/// Default sampling temperature for conversation
pub const DEFAULT_CONVERSATION_TEMPERATURE: f64 = 0.7;
/// Default output token cap for conversation
pub const DEFAULT_CONVERSATION_MAX_TOKENS: u32 = 1000;
/// Default number of prior exchanges included in a prompt
pub const DEFAULT_CONVERSATION_CONTEXT_LENGTH: usize = 10;

/// Sample rate of the PCM returned by the audio endpoint
pub const AUDIO_SAMPLE_RATE: u32 = 24_000;
/// Channel count of the PCM returned by the audio endpoint
pub const AUDIO_CHANNELS: u16 = 1;
/// Bytes per sample of the PCM returned by the audio endpoint
pub const AUDIO_SAMPLE_WIDTH: u16 = 2;

/// Documented vendor request timeout in seconds; not applied to vendor calls
pub const API_TIMEOUT_SECS: u64 = 30;
/// Longest message accepted for synthesis, in characters
pub const MAX_TEXT_LENGTH: usize = 8000;
/// Prompt budget in characters before history is dropped
pub const CONTEXT_WINDOW: usize = 32_000;
/// Retained history entries (20 exchanges)
pub const MAX_HISTORY_ENTRIES: usize = 40;

/// A read-only identifier → label table
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [(&'static str, &'static str)],
}

impl Catalog {
    /// Wrap a static table
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Label for an identifier
    pub fn get(&self, id: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == id)
            .map(|(_, label)| *label)
    }

    /// Whether the identifier is part of the catalog
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Identifiers in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// `(identifier, label)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of entries
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Selectable generative models
pub const MODELS: Catalog = Catalog::new(&[
    ("gemini-2.5-flash-preview-tts", "Gemini 2.5 Flash TTS (Fast)"),
    ("gemini-2.5-pro-preview-tts", "Gemini 2.5 Pro TTS (High Quality)"),
    ("gemini-2.5-pro-preview-06-05", "Gemini 2.5 Pro (Conversation)"),
]);

/// Prebuilt voices and their character
pub const VOICES: Catalog = Catalog::new(&[
    ("Zephyr", "Bright"),
    ("Puck", "Upbeat"),
    ("Charon", "Informative"),
    ("Kore", "Firm"),
    ("Fenrir", "Excitable"),
    ("Leda", "Youthful"),
    ("Orus", "Firm"),
    ("Aoede", "Breezy"),
    ("Callirrhoe", "Easy-going"),
    ("Autonoe", "Bright"),
    ("Enceladus", "Breathy"),
    ("Iapetus", "Clear"),
    ("Umbriel", "Easy-going"),
    ("Algieba", "Smooth"),
    ("Despina", "Smooth"),
    ("Erinome", "Clear"),
    ("Algenib", "Gravelly"),
    ("Rasalgethi", "Informative"),
    ("Laomedeia", "Upbeat"),
    ("Achernar", "Soft"),
    ("Alnilam", "Firm"),
    ("Schedar", "Even"),
    ("Gacrux", "Mature"),
    ("Pulcherrima", "Forward"),
    ("Achird", "Friendly"),
    ("Zubenelgenubi", "Casual"),
    ("Vindemiatrix", "Gentle"),
    ("Sadachbia", "Lively"),
    ("Sadaltager", "Knowledgeable"),
    ("Sulafat", "Warm"),
]);

/// Speaking styles
pub const SPEECH_STYLES: &[&str] = &[
    "natural",
    "cheerful",
    "excited",
    "calm",
    "professional",
    "friendly",
    "mysterious",
    "dramatic",
    "whisper",
    "confident",
];

/// Emotions
pub const EMOTIONS: &[&str] = &[
    "neutral",
    "happy",
    "sad",
    "angry",
    "surprised",
    "disgusted",
    "fearful",
    "excited",
    "calm",
    "serious",
];

/// Pace options
pub const PACE_OPTIONS: &[&str] = &["very_slow", "slow", "normal", "fast", "very_fast"];

/// TTS quality tiers
pub const TTS_QUALITY_OPTIONS: &[&str] = &["standard", "high"];

/// Languages offered for synthesis
pub const SUPPORTED_LANGUAGES: Catalog = Catalog::new(&[
    ("ar-EG", "Arabic (Egyptian)"),
    ("en-US", "English (US)"),
    ("es-US", "Spanish (US)"),
    ("fr-FR", "French (France)"),
    ("de-DE", "German (Germany)"),
    ("hi-IN", "Hindi (India)"),
    ("id-ID", "Indonesian (Indonesia)"),
    ("it-IT", "Italian (Italy)"),
    ("ja-JP", "Japanese (Japan)"),
    ("ko-KR", "Korean (Korea)"),
    ("pt-BR", "Portuguese (Brazil)"),
    ("ru-RU", "Russian (Russia)"),
    ("nl-NL", "Dutch (Netherlands)"),
    ("pl-PL", "Polish (Poland)"),
    ("th-TH", "Thai (Thailand)"),
    ("tr-TR", "Turkish (Turkey)"),
    ("vi-VN", "Vietnamese (Vietnam)"),
    ("ro-RO", "Romanian (Romania)"),
    ("uk-UA", "Ukrainian (Ukraine)"),
    ("bn-BD", "Bengali (Bangladesh)"),
    ("en-IN", "English (India)"),
    ("mr-IN", "Marathi (India)"),
    ("ta-IN", "Tamil (India)"),
    ("te-IN", "Telugu (India)"),
    ("auto", "Auto-detect"),
]);

/// Languages offered for recognition
pub const STT_SUPPORTED_LANGUAGES: Catalog = Catalog::new(&[
    ("en-US", "English (US)"),
    ("en-GB", "English (UK)"),
    ("en-IN", "English (India)"),
    ("es-ES", "Spanish (Spain)"),
    ("es-US", "Spanish (US)"),
    ("fr-FR", "French (France)"),
    ("de-DE", "German (Germany)"),
    ("it-IT", "Italian (Italy)"),
    ("pt-BR", "Portuguese (Brazil)"),
    ("nl-NL", "Dutch (Netherlands)"),
    ("pl-PL", "Polish (Poland)"),
    ("ru-RU", "Russian (Russia)"),
    ("uk-UA", "Ukrainian (Ukraine)"),
    ("tr-TR", "Turkish (Turkey)"),
    ("ar-EG", "Arabic (Egypt)"),
    ("hi-IN", "Hindi (India)"),
    ("ja-JP", "Japanese (Japan)"),
    ("ko-KR", "Korean (Korea)"),
    ("zh-CN", "Chinese (Simplified)"),
    ("th-TH", "Thai (Thailand)"),
    ("vi-VN", "Vietnamese (Vietnam)"),
    ("id-ID", "Indonesian (Indonesia)"),
    ("sv-SE", "Swedish (Sweden)"),
    ("da-DK", "Danish (Denmark)"),
    ("nb-NO", "Norwegian (Norway)"),
    ("fi-FI", "Finnish (Finland)"),
    ("cs-CZ", "Czech (Czechia)"),
    ("ro-RO", "Romanian (Romania)"),
]);

/// Recognition models
pub const STT_MODELS: Catalog = Catalog::new(&[
    ("latest_long", "Latest Long (Best for long audio)"),
    ("latest_short", "Latest Short (Best for short commands)"),
    ("command_and_search", "Command and Search"),
    ("phone_call", "Phone Call"),
    ("video", "Video"),
    ("default", "Default"),
]);

/// Sample rates accepted for recognition
pub const STT_SAMPLE_RATES: &[u32] = &[8_000, 16_000, 22_050, 24_000, 44_100, 48_000];

/// Two-letter languages the conversation agent advertises
pub const CONVERSATION_LANGUAGES: &[&str] = &[
    "ar", "en", "es", "fr", "de", "hi", "id", "it", "ja", "ko", "pt", "ru", "nl", "pl", "th", "tr",
    "vi", "ro", "uk", "bn", "mr", "ta", "te",
];

/// Two-letter languages the TTS entity advertises
pub const TTS_LANGUAGES: &[&str] = &["en", "es", "fr", "de", "it", "pt", "ru", "ja", "ko", "zh"];

/// Two-letter languages the STT entity advertises
pub const STT_LANGUAGES: &[&str] = &[
    "ar", "bg", "ca", "cs", "da", "de", "el", "en", "es", "et", "fi", "fr", "he", "hi", "hr", "hu",
    "id", "is", "it", "ja", "ko", "lt", "lv", "ms", "nl", "no", "pl", "pt", "ro", "ru", "sk", "sl",
    "sv", "th", "tr", "uk", "vi", "zh",
];
