//! Types for speech processing
//!
//! Contains audio payloads, recognition settings, transcriptions and voice
//! descriptors.

use serde::{Deserialize, Serialize};

/// Audio payload formats handled by the providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// Raw signed 16-bit little-endian PCM without a header
    Pcm,
    /// WAV format (uncompressed)
    Wav,
    /// OGG container (typically with Opus codec)
    Ogg,
    /// Opus codec
    Opus,
}

impl AudioFormat {
    /// Get the MIME type for this audio format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Pcm => "audio/l16",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
            Self::Opus => "audio/opus",
        }
    }

    /// Get the file extension for this audio format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Pcm => "pcm",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Opus => "opus",
        }
    }

    /// Parse audio format from MIME type
    #[must_use]
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        // Handle compound MIME types like "audio/L16;codec=pcm;rate=24000"
        let base_mime = mime.split(';').next().unwrap_or(mime).trim().to_ascii_lowercase();

        match base_mime.as_str() {
            "audio/l16" | "audio/pcm" => Some(Self::Pcm),
            "audio/wav" | "audio/x-wav" | "audio/wave" => Some(Self::Wav),
            "audio/ogg" => Some(Self::Ogg),
            "audio/opus" => Some(Self::Opus),
            _ => None,
        }
    }
}

/// Container for audio data with metadata
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Raw audio bytes
    data: Vec<u8>,
    /// Audio format
    format: AudioFormat,
    /// Sample rate in Hz (if known)
    sample_rate: Option<u32>,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self {
            data,
            format,
            sample_rate: None,
        }
    }

    /// Create audio data with sample rate
    #[must_use]
    pub const fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the audio format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Get the sample rate (if known)
    #[must_use]
    pub const fn sample_rate(&self) -> Option<u32> {
        self.sample_rate
    }

    /// Get the size of the audio data in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the MIME type for this audio
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// A synthesis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    /// Text to speak, including any delivery instruction
    pub text: String,
    /// Prebuilt voice (provider default when `None`)
    pub voice: Option<String>,
    /// Model (provider default when `None`)
    pub model: Option<String>,
}

impl SynthesisRequest {
    /// Request with provider defaults for voice and model
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            model: None,
        }
    }

    /// Set the voice
    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Set the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Encodings accepted by the recognition endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    /// Signed 16-bit little-endian PCM (bare or in WAV)
    Linear16,
    /// Opus frames in an OGG container
    OggOpus,
}

impl AudioEncoding {
    /// MIME type to use when sending the audio inline
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Linear16 => "audio/wav",
            Self::OggOpus => "audio/ogg",
        }
    }
}

/// Recognition settings in the shape of the `RecognitionConfig` resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfig {
    pub encoding: AudioEncoding,
    pub sample_rate_hertz: u32,
    pub language_code: String,
    pub audio_channel_count: u8,
    pub model: String,
    pub use_enhanced: bool,
    pub profanity_filter: bool,
    pub enable_automatic_punctuation: bool,
    pub enable_word_time_offsets: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            encoding: AudioEncoding::Linear16,
            sample_rate_hertz: domain::catalog::DEFAULT_STT_SAMPLE_RATE,
            language_code: domain::catalog::DEFAULT_STT_LANGUAGE.to_string(),
            audio_channel_count: 1,
            model: domain::catalog::DEFAULT_STT_MODEL.to_string(),
            use_enhanced: true,
            profanity_filter: false,
            enable_automatic_punctuation: true,
            enable_word_time_offsets: false,
        }
    }
}

/// Result of speech-to-text transcription
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    /// Transcribed text
    pub text: String,
    /// Language code reported by the service
    pub language: Option<String>,
    /// Confidence score (0.0 - 1.0)
    pub confidence: Option<f32>,
}

impl Transcription {
    /// Create a new transcription
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            confidence: None,
        }
    }

    /// Set the detected language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the confidence score
    #[must_use]
    pub const fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Whether the transcript has no visible text
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Information about an available voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Voice identifier used in requests
    pub id: String,
    /// Human-readable descriptor
    pub description: String,
}

impl VoiceInfo {
    /// Create voice info
    #[must_use]
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}
