//! WAVE format descriptor and block-alignment math

use crate::error::{Error, Result};

/// WAV format tag identifying the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// PCM (uncompressed)
    Pcm,
    /// Microsoft ADPCM (detected only; decoded outside this crate)
    MsAdpcm,
    /// IEEE Float
    IeeeFloat,
    /// IMA ADPCM ("IMA4")
    ImaAdpcm,
    /// Unknown format
    Unknown(u16),
}

impl From<u16> for FormatTag {
    fn from(val: u16) -> Self {
        match val {
            0x0001 => FormatTag::Pcm,
            0x0002 => FormatTag::MsAdpcm,
            0x0003 => FormatTag::IeeeFloat,
            0x0011 => FormatTag::ImaAdpcm,
            other => FormatTag::Unknown(other),
        }
    }
}

impl From<FormatTag> for u16 {
    fn from(tag: FormatTag) -> Self {
        match tag {
            FormatTag::Pcm => 0x0001,
            FormatTag::MsAdpcm => 0x0002,
            FormatTag::IeeeFloat => 0x0003,
            FormatTag::ImaAdpcm => 0x0011,
            FormatTag::Unknown(val) => val,
        }
    }
}

impl FormatTag {
    /// Whether samples are stored in fixed-size compressed blocks
    pub fn is_compressed(&self) -> bool {
        matches!(self, FormatTag::MsAdpcm | FormatTag::ImaAdpcm)
    }
}

/// Number of decoded samples one compressed block yields per channel
///
/// Returns 0 for uncompressed formats, where block alignment carries no
/// sample grouping and callers must special-case. The compressed formulas
/// are the vendor-documented block math for each codec and are exact:
/// a partial trailing block's yield is this same function applied to the
/// smaller size.
pub fn sample_alignment(tag: FormatTag, channels: u16, block_align: u16) -> Result<u32> {
    if channels != 1 && channels != 2 {
        return Err(Error::UnsupportedChannelCount(channels));
    }

    let per_channel = u32::from(block_align) / u32::from(channels);

    match tag {
        FormatTag::Pcm | FormatTag::IeeeFloat => Ok(0),
        FormatTag::MsAdpcm => {
            if per_channel < 7 {
                return Err(Error::invalid_sample_data(format!(
                    "MS-ADPCM block alignment {} too small for {} channel(s)",
                    block_align, channels
                )));
            }
            Ok((per_channel - 7) * 2 + 2)
        }
        FormatTag::ImaAdpcm => {
            if per_channel < 4 {
                return Err(Error::invalid_sample_data(format!(
                    "IMA4 block alignment {} too small for {} channel(s)",
                    block_align, channels
                )));
            }
            Ok((per_channel - 4) / 4 * 8 + 1)
        }
        FormatTag::Unknown(val) => Err(Error::unsupported_format(format!(
            "format code {:#06x}",
            val
        ))),
    }
}

/// Format metadata extracted from a WAVE stream, immutable after parse
#[derive(Debug, Clone)]
pub struct WaveFormatDescriptor {
    /// Format tag (codec ID)
    pub format_tag: FormatTag,
    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bytes per compressed block (redundant with bit depth for PCM)
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Decoded samples per compressed block per channel; 0 for uncompressed
    pub samples_per_block: u32,
    /// Total sample count carried in or derived from the stream
    ///
    /// A `fact` chunk stores sample frames multiplied by the channel count;
    /// the derived fallback counts frames for uncompressed formats and
    /// per-channel samples for compressed ones. The unit mismatch mirrors
    /// the files this parser accepts.
    pub sample_count: u32,
}

impl WaveFormatDescriptor {
    /// Bytes covering one sample frame of uncompressed audio
    pub fn bytes_per_frame(&self) -> usize {
        self.channels as usize * (self.bits_per_sample as usize / 8)
    }

    /// Playback duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.sample_count as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tag_conversion() {
        assert_eq!(u16::from(FormatTag::Pcm), 0x0001);
        assert_eq!(FormatTag::from(0x0001), FormatTag::Pcm);
        assert_eq!(FormatTag::from(0x0002), FormatTag::MsAdpcm);
        assert_eq!(FormatTag::from(0x0003), FormatTag::IeeeFloat);
        assert_eq!(FormatTag::from(0x0011), FormatTag::ImaAdpcm);
        assert_eq!(FormatTag::from(0x1234), FormatTag::Unknown(0x1234));
        assert_eq!(u16::from(FormatTag::Unknown(0x1234)), 0x1234);
    }

    #[test]
    fn test_sample_alignment_uncompressed_is_zero() {
        assert_eq!(sample_alignment(FormatTag::Pcm, 1, 2).unwrap(), 0);
        assert_eq!(sample_alignment(FormatTag::Pcm, 2, 4).unwrap(), 0);
        assert_eq!(sample_alignment(FormatTag::IeeeFloat, 2, 8).unwrap(), 0);
    }

    #[test]
    fn test_sample_alignment_ima4() {
        // canonical smallest block: 36 bytes mono, 72 bytes stereo
        assert_eq!(sample_alignment(FormatTag::ImaAdpcm, 1, 36).unwrap(), 65);
        assert_eq!(sample_alignment(FormatTag::ImaAdpcm, 2, 72).unwrap(), 65);
        // common 1024-byte mono block
        assert_eq!(sample_alignment(FormatTag::ImaAdpcm, 1, 1024).unwrap(), 2041);
        // header-only block yields just the seed sample
        assert_eq!(sample_alignment(FormatTag::ImaAdpcm, 1, 4).unwrap(), 1);
    }

    #[test]
    fn test_sample_alignment_ms_adpcm() {
        assert_eq!(sample_alignment(FormatTag::MsAdpcm, 1, 512).unwrap(), 1012);
        assert_eq!(sample_alignment(FormatTag::MsAdpcm, 2, 512).unwrap(), 500);
    }

    #[test]
    fn test_sample_alignment_rejects_bad_channel_count() {
        assert!(matches!(
            sample_alignment(FormatTag::ImaAdpcm, 3, 36),
            Err(Error::UnsupportedChannelCount(3))
        ));
        assert!(matches!(
            sample_alignment(FormatTag::Pcm, 0, 2),
            Err(Error::UnsupportedChannelCount(0))
        ));
    }

    #[test]
    fn test_sample_alignment_rejects_undersized_blocks() {
        assert!(matches!(
            sample_alignment(FormatTag::ImaAdpcm, 2, 6),
            Err(Error::InvalidSampleData(_))
        ));
        assert!(matches!(
            sample_alignment(FormatTag::MsAdpcm, 1, 6),
            Err(Error::InvalidSampleData(_))
        ));
    }

    #[test]
    fn test_descriptor_derived_values() {
        let descriptor = WaveFormatDescriptor {
            format_tag: FormatTag::Pcm,
            channels: 2,
            sample_rate: 44100,
            block_align: 4,
            bits_per_sample: 16,
            samples_per_block: 0,
            sample_count: 44100,
        };

        assert_eq!(descriptor.bytes_per_frame(), 4);
        assert!((descriptor.duration_seconds() - 1.0).abs() < 1e-9);
    }
}
