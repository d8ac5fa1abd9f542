//! Speech ports - Synthesis and recognition backends

use async_trait::async_trait;
use domain::entities::AudioContainer;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Styled text ready to be spoken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisInput {
    /// Text including any style instruction
    pub text: String,
    /// Prebuilt voice name
    pub voice: String,
    /// TTS model
    pub model: String,
}

/// Port for speech synthesis
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SynthesisPort: Send + Sync {
    /// Synthesize speech, returning raw 24 kHz mono 16-bit PCM
    async fn synthesize(&self, input: SynthesisInput) -> Result<Vec<u8>, ApplicationError>;

    /// Frame synthesized PCM as a WAV file
    fn frame_wav(&self, pcm: &[u8]) -> Result<Vec<u8>, ApplicationError>;
}

/// Encoding of the audio handed to the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionEncoding {
    /// 16-bit linear PCM
    Linear16,
    /// Opus in an OGG container
    OggOpus,
}

/// Recognition parameters derived from stream metadata and settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionSettings {
    pub container: AudioContainer,
    pub encoding: RecognitionEncoding,
    pub sample_rate_hertz: u32,
    pub channel_count: u8,
    pub language_code: String,
    pub model: String,
    pub use_enhanced: bool,
    pub profanity_filter: bool,
    pub automatic_punctuation: bool,
    pub word_time_offsets: bool,
}

/// Port for speech recognition
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecognitionPort: Send + Sync {
    /// Transcribe one buffered recording
    ///
    /// Returns the best transcript, or an empty string when nothing was
    /// recognized.
    async fn recognize(
        &self,
        audio: Vec<u8>,
        settings: RecognitionSettings,
    ) -> Result<String, ApplicationError>;

    /// Name of the recognition backend
    fn backend_name(&self) -> &'static str;
}
