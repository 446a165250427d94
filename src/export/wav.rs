//! Uncompressed WAV encoding and decoding.

use std::io::Cursor;
use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use super::{Bitrate, Encoder};
use crate::buffer::AudioBuffer;
use crate::error::Result;

fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Encodes a buffer as a complete mono 16-bit PCM WAV file in memory.
pub fn encode_wav(buffer: &AudioBuffer) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + buffer.frame_count() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, wav_spec(buffer.sample_rate()))?;
        for &sample in buffer.samples() {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Decodes WAV bytes produced by [`encode_wav`].
///
/// Only mono 16-bit integer PCM is accepted.
pub fn decode_wav(bytes: &[u8]) -> Result<AudioBuffer> {
    read_from(WavReader::new(Cursor::new(bytes))?)
}

/// Reads a mono 16-bit integer PCM WAV file from disk.
pub fn read_wav(path: impl AsRef<Path>) -> Result<AudioBuffer> {
    read_from(WavReader::open(path)?)
}

fn read_from<R: std::io::Read>(mut reader: WavReader<R>) -> Result<AudioBuffer> {
    let spec = reader.spec();
    if spec.channels != 1 || spec.bits_per_sample != 16 || spec.sample_format != SampleFormat::Int
    {
        return Err(hound::Error::Unsupported.into());
    }
    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(AudioBuffer::new(samples, spec.sample_rate))
}

/// [`Encoder`] for the uncompressed path. Never needs anything from the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder;

impl Encoder for WavEncoder {
    fn name(&self) -> &str {
        "wav"
    }

    fn encode(&self, buffer: &AudioBuffer, _bitrate: Option<&Bitrate>) -> Result<Vec<u8>> {
        encode_wav(buffer)
    }
}
