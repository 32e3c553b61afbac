//! Minimal RIFF/WAVE encoding for raw PCM from the TTS API.
//!
//! Gemini returns headerless little-endian PCM; wrapping it in a 44-byte
//! canonical header makes it playable and lets FFmpeg read it.

use dreadcast_error::{AdapterError, AdapterErrorKind, DreadcastResult};

const HEADER_LEN: usize = 44;

/// Format facts read back from a WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    /// Channel count
    pub channels: u16,
    /// Samples per second
    pub sample_rate: u32,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Length of the PCM payload in bytes
    pub data_len: u32,
}

impl WavInfo {
    /// Parse the header of a WAV file.
    ///
    /// Walks the chunk list, so files with extra chunks before `data` are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns an audio error for anything that is not PCM RIFF/WAVE.
    pub fn parse(bytes: &[u8]) -> DreadcastResult<Self> {
        if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return Err(audio_error("missing RIFF/WAVE header"));
        }

        let mut offset = 12;
        let mut format: Option<(u16, u32, u16)> = None;

        while offset + 8 <= bytes.len() {
            let id = &bytes[offset..offset + 4];
            let size = read_u32(bytes, offset + 4);
            let body = offset + 8;

            match id {
                b"fmt " => {
                    if body + 16 > bytes.len() {
                        return Err(audio_error("truncated fmt chunk"));
                    }
                    let audio_format = read_u16(bytes, body);
                    if audio_format != 1 {
                        return Err(audio_error("only PCM WAV is supported"));
                    }
                    format = Some((
                        read_u16(bytes, body + 2),
                        read_u32(bytes, body + 4),
                        read_u16(bytes, body + 14),
                    ));
                }
                b"data" => {
                    let (channels, sample_rate, bits_per_sample) =
                        format.ok_or_else(|| audio_error("data chunk before fmt chunk"))?;
                    return Ok(Self {
                        channels,
                        sample_rate,
                        bits_per_sample,
                        data_len: size,
                    });
                }
                _ => {}
            }

            // Chunks are word-aligned
            offset = body + size as usize + (size as usize & 1);
        }

        Err(audio_error("no data chunk"))
    }

    /// Playback length in seconds.
    pub fn duration_secs(&self) -> f64 {
        let bytes_per_second =
            self.sample_rate as f64 * self.channels as f64 * (self.bits_per_sample as f64 / 8.0);
        if bytes_per_second == 0.0 {
            0.0
        } else {
            self.data_len as f64 / bytes_per_second
        }
    }
}

/// Wrap raw little-endian PCM in a canonical WAV header.
///
/// # Errors
///
/// Returns an audio error if the payload does not fit in a RIFF file or the
/// format is degenerate.
///
/// # Examples
///
/// ```
/// use dreadcast_narration::{encode_wav, WavInfo};
///
/// let pcm = vec![0u8; 48_000]; // one second of 16-bit mono at 24 kHz
/// let wav = encode_wav(&pcm, 24_000, 1, 16).unwrap();
/// let info = WavInfo::parse(&wav).unwrap();
/// assert_eq!(info.duration_secs(), 1.0);
/// ```
pub fn encode_wav(
    pcm: &[u8],
    sample_rate: u32,
    channels: u16,
    bits_per_sample: u16,
) -> DreadcastResult<Vec<u8>> {
    if sample_rate == 0 || channels == 0 || bits_per_sample == 0 || bits_per_sample % 8 != 0 {
        return Err(audio_error("invalid PCM format"));
    }
    let data_len = u32::try_from(pcm.len())
        .ok()
        .filter(|len| *len <= u32::MAX - 36)
        .ok_or_else(|| audio_error("PCM payload too large for WAV"))?;

    let block_align = channels * (bits_per_sample / 8);
    let byte_rate = sample_rate * block_align as u32;

    let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits_per_sample.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(pcm);
    Ok(out)
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[track_caller]
fn audio_error(message: &str) -> dreadcast_error::DreadcastError {
    AdapterError::new(AdapterErrorKind::Audio(message.to_string())).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let wav = encode_wav(&[1, 2, 3, 4], 24_000, 1, 16).unwrap();
        assert_eq!(wav.len(), HEADER_LEN + 4);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(read_u32(&wav, 4), 40);
        assert_eq!(read_u32(&wav, 24), 24_000);
        assert_eq!(read_u32(&wav, 28), 48_000);
        assert_eq!(read_u16(&wav, 32), 2);
        assert_eq!(read_u32(&wav, 40), 4);
        assert_eq!(&wav[44..], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_parse_skips_unknown_chunks() {
        let mut wav = encode_wav(&[0u8; 8], 16_000, 2, 16).unwrap();
        // Splice a LIST chunk (odd size, padded) between fmt and data
        let list = [b'L', b'I', b'S', b'T', 3, 0, 0, 0, b'a', b'b', b'c', 0];
        wav.splice(36..36, list);

        let info = WavInfo::parse(&wav).unwrap();
        assert_eq!(info.channels, 2);
        assert_eq!(info.sample_rate, 16_000);
        assert_eq!(info.data_len, 8);
    }

    #[test]
    fn test_parse_rejects_non_wav() {
        assert!(WavInfo::parse(b"ID3\x03not a wav file").is_err());
        assert!(WavInfo::parse(&[]).is_err());
    }

    #[test]
    fn test_encode_rejects_degenerate_format() {
        assert!(encode_wav(&[0u8; 4], 0, 1, 16).is_err());
        assert!(encode_wav(&[0u8; 4], 24_000, 1, 12).is_err());
    }
}
