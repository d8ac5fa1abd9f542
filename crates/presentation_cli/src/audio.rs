//! WAV input for the `transcribe` command

use std::path::Path;

use anyhow::{Context, bail};
use domain::{AUDIO_BIT_RATE, AudioChannels, AudioCodec, AudioContainer, AudioSampleRate, SpeechMetadata};

/// Bytes per streamed chunk, roughly 100 ms of 16 kHz mono audio
pub const CHUNK_BYTES: usize = 3200;

/// Decoded 16-bit PCM ready to stream
#[derive(Debug)]
pub struct PcmInput {
    pub metadata: SpeechMetadata,
    pub pcm: Vec<u8>,
}

impl PcmInput {
    /// Audio split the way the host streams it
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> {
        self.pcm.chunks(CHUNK_BYTES)
    }
}

/// Read a 16-bit PCM WAV file
pub fn read_wav(path: &Path, language: &str) -> anyhow::Result<PcmInput> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != AUDIO_BIT_RATE {
        bail!("Only 16-bit integer PCM is supported");
    }
    let Some(sample_rate) = AudioSampleRate::from_hz(spec.sample_rate) else {
        bail!("Unsupported sample rate: {} Hz", spec.sample_rate);
    };
    let channel = match spec.channels {
        1 => AudioChannels::Mono,
        2 => AudioChannels::Stereo,
        n => bail!("Unsupported channel count: {n}"),
    };

    let samples = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to decode samples")?;
    let pcm = samples.iter().flat_map(|s| s.to_le_bytes()).collect();

    Ok(PcmInput {
        metadata: SpeechMetadata {
            language: language.to_string(),
            format: AudioContainer::Wav,
            codec: AudioCodec::Pcm,
            bit_rate: AUDIO_BIT_RATE,
            sample_rate: Some(sample_rate),
            channel,
        },
        pcm,
    })
}
