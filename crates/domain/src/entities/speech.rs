//! Speech-to-text stream metadata and results

use serde::{Deserialize, Serialize};

/// Container of an incoming audio stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioContainer {
    /// RIFF/WAVE container
    Wav,
    /// OGG container
    Ogg,
}

impl AudioContainer {
    /// Every supported container
    pub const ALL: [Self; 2] = [Self::Wav, Self::Ogg];

    /// Get the MIME type for this container
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
        }
    }
}

/// Codec of an incoming audio stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    /// Uncompressed PCM
    Pcm,
    /// Opus
    Opus,
}

impl AudioCodec {
    /// Every supported codec
    pub const ALL: [Self; 2] = [Self::Pcm, Self::Opus];
}

/// Sample rates accepted from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioSampleRate {
    Hz8000,
    Hz16000,
    Hz22050,
    Hz24000,
    Hz44100,
    Hz48000,
}

impl AudioSampleRate {
    /// Every supported sample rate
    pub const ALL: [Self; 6] = [
        Self::Hz8000,
        Self::Hz16000,
        Self::Hz22050,
        Self::Hz24000,
        Self::Hz44100,
        Self::Hz48000,
    ];

    /// Rate in Hertz
    #[must_use]
    pub const fn hz(&self) -> u32 {
        match self {
            Self::Hz8000 => 8_000,
            Self::Hz16000 => 16_000,
            Self::Hz22050 => 22_050,
            Self::Hz24000 => 24_000,
            Self::Hz44100 => 44_100,
            Self::Hz48000 => 48_000,
        }
    }

    /// Look up a supported rate by its value in Hertz
    pub fn from_hz(hz: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|rate| rate.hz() == hz)
    }
}

/// Channel layout of an incoming audio stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioChannels {
    #[default]
    Mono,
    Stereo,
}

impl AudioChannels {
    /// Every supported layout
    pub const ALL: [Self; 2] = [Self::Mono, Self::Stereo];

    /// Channel count
    #[must_use]
    pub const fn count(&self) -> u8 {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }
}

/// Bits per sample accepted from the host
pub const AUDIO_BIT_RATE: u16 = 16;

/// Description of an audio stream handed over by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechMetadata {
    /// Language requested by the host
    pub language: String,
    /// Container format
    pub format: AudioContainer,
    /// Codec
    pub codec: AudioCodec,
    /// Bits per sample
    pub bit_rate: u16,
    /// Declared sample rate, if any
    pub sample_rate: Option<AudioSampleRate>,
    /// Channel layout
    pub channel: AudioChannels,
}

impl SpeechMetadata {
    /// Metadata for 16 kHz mono PCM in a WAV container
    pub fn wav_pcm(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            format: AudioContainer::Wav,
            codec: AudioCodec::Pcm,
            bit_rate: AUDIO_BIT_RATE,
            sample_rate: Some(AudioSampleRate::Hz16000),
            channel: AudioChannels::Mono,
        }
    }
}

/// Outcome of a recognition request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechResultState {
    Success,
    Error,
}

/// Transcript returned to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechResult {
    /// Recognised text; empty on error
    pub text: String,
    /// Outcome
    pub result: SpeechResultState,
}

impl SpeechResult {
    /// A successful transcript
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            result: SpeechResultState::Success,
        }
    }

    /// A failed recognition with empty text
    pub fn error() -> Self {
        Self {
            text: String::new(),
            result: SpeechResultState::Error,
        }
    }

    /// Check if recognition succeeded
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.result, SpeechResultState::Success)
    }
}
