//! Minimal RIFF/WAVE container packaging for raw PCM.
//!
//! The synthesis endpoint returns bare little-endian PCM samples, while
//! media elements want a self-describing file. This module wraps the
//! samples in the fixed 44-byte header layout (single "fmt " chunk, no
//! metadata chunks) and can render the result as a `data:` URI that a
//! player consumes directly.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

/// Size of the fixed RIFF/WAVE header in bytes.
pub const HEADER_LEN: usize = 44;

/// MIME prefix of the data URIs produced by [`to_data_uri`].
pub const DATA_URI_PREFIX: &str = "data:audio/wav;base64,";

#[derive(Error, Debug)]
pub enum WavError {
    #[error("Invalid WAV format: {0}")]
    InvalidFormat(&'static str),
    #[error("PCM payload of {0} bytes does not fit the 32-bit RIFF size fields")]
    PayloadTooLarge(usize),
}

/// PCM format parameters for a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of interleaved channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz, per channel.
    pub sample_rate: u32,
    /// Width of one sample in bytes (2 for 16-bit PCM).
    pub bytes_per_sample: u16,
}

impl Default for WavFormat {
    /// The format the synthesis model emits: mono 16-bit PCM at 24 kHz.
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 24_000,
            bytes_per_sample: 2,
        }
    }
}

impl WavFormat {
    /// Creates a mono 16-bit format at the given sample rate.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    /// Bytes per sample frame (one sample per channel).
    pub fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample
    }

    /// Bytes per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// Sample width in bits, as stored in the header.
    pub fn bits_per_sample(&self) -> u16 {
        self.bytes_per_sample * 8
    }

    fn validate(&self) -> Result<(), WavError> {
        if self.channels == 0 {
            return Err(WavError::InvalidFormat("channels must be at least 1"));
        }
        if self.sample_rate == 0 {
            return Err(WavError::InvalidFormat("sample rate must be at least 1 Hz"));
        }
        if self.bytes_per_sample == 0 {
            return Err(WavError::InvalidFormat("bytes per sample must be at least 1"));
        }
        Ok(())
    }
}

/// Wraps raw little-endian PCM bytes in a complete WAV container.
///
/// The payload is copied verbatim after the header. Its length is not
/// required to be a whole number of frames; the upstream synthesis flow
/// is equally permissive, so a trailing partial frame is passed through
/// rather than rejected.
pub fn encode(pcm: &[u8], format: &WavFormat) -> Result<Vec<u8>, WavError> {
    format.validate()?;
    let data_size = check_payload(pcm.len())?;

    let mut wav = Vec::with_capacity(HEADER_LEN + pcm.len());

    // RIFF chunk: total file size minus the 8 bytes of this header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk: 16-byte PCM layout, format tag 1 (uncompressed)
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&format.channels.to_le_bytes());
    wav.extend_from_slice(&format.sample_rate.to_le_bytes());
    wav.extend_from_slice(&format.byte_rate().to_le_bytes());
    wav.extend_from_slice(&format.block_align().to_le_bytes());
    wav.extend_from_slice(&format.bits_per_sample().to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    wav.extend_from_slice(pcm);

    Ok(wav)
}

/// Renders an already-encoded container as a base64 data URI.
pub fn to_data_uri(wav: &[u8]) -> String {
    format!("{DATA_URI_PREFIX}{}", STANDARD.encode(wav))
}

/// Encodes PCM into a container and renders it as a data URI in one step.
pub fn encode_data_uri(pcm: &[u8], format: &WavFormat) -> Result<String, WavError> {
    Ok(to_data_uri(&encode(pcm, format)?))
}

// Every size field in the header is u32; a payload longer than
// u32::MAX - 44 bytes cannot be represented.
fn check_payload(len: usize) -> Result<u32, WavError> {
    match u32::try_from(len) {
        Ok(n) if n <= u32::MAX - HEADER_LEN as u32 => Ok(n),
        _ => Err(WavError::PayloadTooLarge(len)),
    }
}
