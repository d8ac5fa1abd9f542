//! Speech recognition service - Buffered transcription of an audio stream

use std::{fmt, sync::Arc};

use domain::catalog::STT_LANGUAGES;
use domain::{
    AUDIO_BIT_RATE, AudioChannels, AudioCodec, AudioContainer, AudioSampleRate, EffectiveSettings,
    SpeechMetadata, SpeechResult,
};
use futures::{Stream, StreamExt};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    ports::{RecognitionEncoding, RecognitionPort, RecognitionSettings},
    services::{OptionsStore, dispatch::run_detached},
};

/// Speech-to-text entity logic
pub struct SpeechRecognitionService {
    recognition: Option<Arc<dyn RecognitionPort>>,
    options: Arc<OptionsStore>,
}

impl fmt::Debug for SpeechRecognitionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechRecognitionService")
            .field(
                "backend",
                &self.recognition.as_ref().map(|r| r.backend_name()),
            )
            .finish_non_exhaustive()
    }
}

/// Build recognition parameters from stream metadata and settings
///
/// The declared sample rate wins over `stt_sample_rate`; OGG streams are
/// sent as Opus, everything else as 16-bit linear PCM.
pub fn recognition_settings(
    metadata: &SpeechMetadata,
    settings: &EffectiveSettings,
) -> RecognitionSettings {
    let encoding = match metadata.format {
        AudioContainer::Ogg => RecognitionEncoding::OggOpus,
        AudioContainer::Wav => RecognitionEncoding::Linear16,
    };

    RecognitionSettings {
        container: metadata.format,
        encoding,
        sample_rate_hertz: metadata
            .sample_rate
            .map_or(settings.stt_sample_rate, |rate| rate.hz()),
        channel_count: metadata.channel.count(),
        language_code: settings.stt_language.clone(),
        model: settings.stt_model.clone(),
        use_enhanced: settings.stt_use_enhanced,
        profanity_filter: settings.stt_profanity_filter,
        automatic_punctuation: settings.stt_punctuation,
        word_time_offsets: false,
    }
}

impl SpeechRecognitionService {
    /// Create a service; `recognition` is `None` when no client could be built
    pub fn new(recognition: Option<Arc<dyn RecognitionPort>>, options: Arc<OptionsStore>) -> Self {
        Self {
            recognition,
            options,
        }
    }

    /// Whether a recognition client is available
    pub fn has_client(&self) -> bool {
        self.recognition.is_some()
    }

    /// Languages the STT entity advertises
    pub const fn supported_languages(&self) -> &'static [&'static str] {
        STT_LANGUAGES
    }

    /// Accepted containers
    pub const fn supported_formats(&self) -> &'static [AudioContainer] {
        &AudioContainer::ALL
    }

    /// Accepted codecs
    pub const fn supported_codecs(&self) -> &'static [AudioCodec] {
        &AudioCodec::ALL
    }

    /// Accepted bits per sample
    pub const fn supported_bit_rates(&self) -> &'static [u16] {
        &[AUDIO_BIT_RATE]
    }

    /// Accepted sample rates
    pub const fn supported_sample_rates(&self) -> &'static [AudioSampleRate] {
        &AudioSampleRate::ALL
    }

    /// Accepted channel layouts
    pub const fn supported_channels(&self) -> &'static [AudioChannels] {
        &AudioChannels::ALL
    }

    /// Drain `stream` and transcribe it
    ///
    /// Every failure is logged and reported as an error result with empty
    /// text.
    #[instrument(skip(self, metadata, stream), fields(format = ?metadata.format, sample_rate = ?metadata.sample_rate))]
    pub async fn process_audio_stream<S, B>(
        &self,
        metadata: &SpeechMetadata,
        stream: S,
    ) -> SpeechResult
    where
        S: Stream<Item = B> + Send,
        B: AsRef<[u8]>,
    {
        let Some(recognition) = self.recognition.as_ref().map(Arc::clone) else {
            error!("Speech recognition client not initialized");
            return SpeechResult::error();
        };

        let audio = stream
            .fold(Vec::new(), |mut buffer, chunk| async move {
                buffer.extend_from_slice(chunk.as_ref());
                buffer
            })
            .await;

        if audio.is_empty() {
            warn!("Received empty audio stream");
            return SpeechResult::error();
        }

        let settings = recognition_settings(metadata, &self.options.effective());
        debug!(
            bytes = audio.len(),
            backend = recognition.backend_name(),
            encoding = ?settings.encoding,
            sample_rate = settings.sample_rate_hertz,
            "Transcribing audio"
        );

        match run_detached(async move { recognition.recognize(audio, settings).await }).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    warn!("No transcription results returned");
                    SpeechResult::error()
                } else {
                    info!(text_len = text.len(), "Transcription complete");
                    SpeechResult::success(text)
                }
            },
            Err(e) => {
                error!(error = %e, "Error processing audio stream");
                SpeechResult::error()
            },
        }
    }
}
