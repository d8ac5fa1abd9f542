//! RIFF/WAVE framing for raw PCM
//!
//! The header is written by hand so that the data chunk holds exactly the
//! bytes the caller supplied, including an odd trailing byte.

use bytes::{BufMut, Bytes, BytesMut};
use domain::catalog::{AUDIO_CHANNELS, AUDIO_SAMPLE_RATE, AUDIO_SAMPLE_WIDTH};

use crate::error::SpeechError;

/// Size of the canonical 44-byte PCM header
pub const WAV_HEADER_LEN: usize = 44;

const PCM_FORMAT_TAG: u16 = 1;
const FMT_CHUNK_LEN: u32 = 16;

/// Sample layout of the PCM being framed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// 24 kHz mono 16-bit, the layout returned by the Gemini audio endpoint
    #[must_use]
    pub const fn gemini_tts() -> Self {
        Self {
            sample_rate: AUDIO_SAMPLE_RATE,
            channels: AUDIO_CHANNELS,
            bits_per_sample: AUDIO_SAMPLE_WIDTH * 8,
        }
    }

    /// Bytes per sample frame (all channels)
    #[must_use]
    pub const fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Bytes per second of audio
    #[must_use]
    pub const fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

/// Wrap `pcm` in a WAV container described by `spec`
///
/// The resulting data chunk length always equals `pcm.len()`.
///
/// # Errors
///
/// Returns [`SpeechError::AudioProcessing`] when the payload is too large to
/// be described by the 32-bit RIFF size fields.
///
/// # Examples
///
/// ```
/// use ai_speech::wav::{WavSpec, wrap_pcm, WAV_HEADER_LEN};
///
/// let wav = wrap_pcm(&[0, 0, 1, 0], WavSpec::gemini_tts()).unwrap();
/// assert_eq!(&wav[..4], b"RIFF");
/// assert_eq!(wav.len(), WAV_HEADER_LEN + 4);
/// ```
pub fn wrap_pcm(pcm: &[u8], spec: WavSpec) -> Result<Bytes, SpeechError> {
    let data_len = u32::try_from(pcm.len())
        .ok()
        .filter(|len| len.checked_add(36).is_some())
        .ok_or_else(|| {
            SpeechError::AudioProcessing(format!(
                "PCM payload of {} bytes is too large for a WAV container",
                pcm.len()
            ))
        })?;

    let mut buf = BytesMut::with_capacity(WAV_HEADER_LEN + pcm.len());

    buf.put_slice(b"RIFF");
    buf.put_u32_le(36 + data_len);
    buf.put_slice(b"WAVE");

    buf.put_slice(b"fmt ");
    buf.put_u32_le(FMT_CHUNK_LEN);
    buf.put_u16_le(PCM_FORMAT_TAG);
    buf.put_u16_le(spec.channels);
    buf.put_u32_le(spec.sample_rate);
    buf.put_u32_le(spec.byte_rate());
    buf.put_u16_le(spec.block_align());
    buf.put_u16_le(spec.bits_per_sample);

    buf.put_slice(b"data");
    buf.put_u32_le(data_len);
    buf.put_slice(pcm);

    Ok(buf.freeze())
}
