//! Sample decoding and backend format dispatch
//!
//! The container parser hands over a descriptor and the raw `data` payload;
//! this module decides whether the payload can be bound by the backend as-is
//! or must be run through a down-converter or the IMA4 block decoder first.

pub mod ima4;
pub mod pcm;

pub use ima4::{Ima4Decoder, ImaChannelState};
pub use pcm::{convert_24_to_16, convert_float_to_16};

use crate::error::{Error, Result};
use crate::format::wav::{parse, FormatTag, WaveFormatDescriptor};
use bytes::Bytes;
use std::io::Read;
use tracing::debug;

/// Canonical sample-buffer formats an audio backend can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferFormat {
    /// 1 channel, 8-bit integer PCM
    Mono8,
    /// 1 channel, 16-bit integer PCM
    Mono16,
    /// 2 channels, 8-bit integer PCM
    Stereo8,
    /// 2 channels, 16-bit integer PCM
    Stereo16,
    /// 1 channel, 32-bit float PCM
    MonoFloat32,
    /// 2 channels, 32-bit float PCM
    StereoFloat32,
    /// 1 channel, Microsoft ADPCM blocks
    MonoMsAdpcm,
    /// 2 channels, Microsoft ADPCM blocks
    StereoMsAdpcm,
    /// 1 channel, IMA4 ADPCM blocks
    MonoIma4,
    /// 2 channels, IMA4 ADPCM blocks
    StereoIma4,
}

impl BufferFormat {
    /// Number of channels the format carries
    pub fn channels(&self) -> u16 {
        match self {
            BufferFormat::Mono8
            | BufferFormat::Mono16
            | BufferFormat::MonoFloat32
            | BufferFormat::MonoMsAdpcm
            | BufferFormat::MonoIma4 => 1,
            BufferFormat::Stereo8
            | BufferFormat::Stereo16
            | BufferFormat::StereoFloat32
            | BufferFormat::StereoMsAdpcm
            | BufferFormat::StereoIma4 => 2,
        }
    }

    /// Whether the buffer holds compressed blocks rather than linear samples
    pub fn is_compressed(&self) -> bool {
        matches!(
            self,
            BufferFormat::MonoMsAdpcm
                | BufferFormat::StereoMsAdpcm
                | BufferFormat::MonoIma4
                | BufferFormat::StereoIma4
        )
    }
}

/// Map a WAVE format triple to the canonical backend buffer format
///
/// Total over the supported combinations; bits per sample only participates
/// for integer PCM, where 8 and 16 are the bindable depths (24-bit input is
/// down-converted before resolution).
pub fn resolve_buffer_format(
    tag: FormatTag,
    channels: u16,
    bits_per_sample: u16,
) -> Result<BufferFormat> {
    if channels != 1 && channels != 2 {
        return Err(Error::UnsupportedChannelCount(channels));
    }
    let stereo = channels == 2;

    match tag {
        FormatTag::Pcm => match bits_per_sample {
            8 if stereo => Ok(BufferFormat::Stereo8),
            8 => Ok(BufferFormat::Mono8),
            16 if stereo => Ok(BufferFormat::Stereo16),
            16 => Ok(BufferFormat::Mono16),
            other => Err(Error::unsupported_format(format!(
                "{}-bit integer PCM has no backend buffer format",
                other
            ))),
        },
        FormatTag::IeeeFloat if stereo => Ok(BufferFormat::StereoFloat32),
        FormatTag::IeeeFloat => Ok(BufferFormat::MonoFloat32),
        FormatTag::MsAdpcm if stereo => Ok(BufferFormat::StereoMsAdpcm),
        FormatTag::MsAdpcm => Ok(BufferFormat::MonoMsAdpcm),
        FormatTag::ImaAdpcm if stereo => Ok(BufferFormat::StereoIma4),
        FormatTag::ImaAdpcm => Ok(BufferFormat::MonoIma4),
        FormatTag::Unknown(val) => Err(Error::unsupported_format(format!(
            "format code {:#06x}",
            val
        ))),
    }
}

/// Backend capability flags, negotiated outside this crate
///
/// A flag set to `true` means the backend binds that compressed or float
/// payload natively, so the decoder passes it through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackendSupport {
    /// Backend binds Microsoft ADPCM blocks directly
    pub ms_adpcm: bool,
    /// Backend binds IMA4 ADPCM blocks directly
    pub ima4: bool,
    /// Backend binds 32-bit float PCM directly
    pub float32: bool,
}

/// Decoded or passed-through audio, ready to hand to the backend
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Format metadata as parsed from the stream
    pub descriptor: WaveFormatDescriptor,
    /// Buffer format the backend should bind `data` as
    pub format: BufferFormat,
    /// Sample buffer: interleaved little-endian PCM, or the verbatim
    /// payload for pass-through formats
    pub data: Bytes,
}

/// Turn a parsed payload into backend-ready samples
///
/// Pass-through when the backend supports the stream's format natively,
/// otherwise transcode to interleaved 16-bit little-endian PCM. MS-ADPCM has
/// no decoder here; without native support it is rejected.
pub fn decode_payload(
    descriptor: WaveFormatDescriptor,
    payload: Bytes,
    support: &BackendSupport,
) -> Result<DecodedAudio> {
    let channels = descriptor.channels;
    let tag = descriptor.format_tag;

    let (format, data) = match tag {
        FormatTag::Pcm => match descriptor.bits_per_sample {
            24 => {
                let pcm = convert_24_to_16(&payload, 0, payload.len())?;
                (
                    resolve_buffer_format(FormatTag::Pcm, channels, 16)?,
                    Bytes::from(pcm),
                )
            }
            bits => (resolve_buffer_format(FormatTag::Pcm, channels, bits)?, payload),
        },
        FormatTag::IeeeFloat => {
            if support.float32 {
                (
                    resolve_buffer_format(tag, channels, descriptor.bits_per_sample)?,
                    payload,
                )
            } else {
                let pcm = convert_float_to_16(&payload, 0, payload.len())?;
                (
                    resolve_buffer_format(FormatTag::Pcm, channels, 16)?,
                    Bytes::from(pcm),
                )
            }
        }
        FormatTag::MsAdpcm => {
            if support.ms_adpcm {
                (
                    resolve_buffer_format(tag, channels, descriptor.bits_per_sample)?,
                    payload,
                )
            } else {
                return Err(Error::unsupported_format(
                    "MS-ADPCM requires native backend support",
                ));
            }
        }
        FormatTag::ImaAdpcm => {
            if support.ima4 {
                (
                    resolve_buffer_format(tag, channels, descriptor.bits_per_sample)?,
                    payload,
                )
            } else {
                let decoder = Ima4Decoder::new(channels, descriptor.block_align)?;
                let mut pcm = decoder.decode(&payload)?;

                // an explicit fact count caps the output; block padding past
                // it is not part of the signal
                let cap = descriptor.sample_count as usize * usize::from(channels) * 2;
                if cap > 0 && pcm.len() > cap {
                    pcm.truncate(cap);
                }

                (
                    resolve_buffer_format(FormatTag::Pcm, channels, 16)?,
                    Bytes::from(pcm),
                )
            }
        }
        FormatTag::Unknown(val) => {
            return Err(Error::unsupported_format(format!(
                "format code {:#06x}",
                val
            )));
        }
    };

    debug!(?format, bytes = data.len(), "audio payload ready for backend");

    Ok(DecodedAudio {
        descriptor,
        format,
        data,
    })
}

/// Parse a RIFF/WAVE stream and decode its payload in one call
pub fn decode_stream<R: Read>(reader: R, support: &BackendSupport) -> Result<DecodedAudio> {
    let (descriptor, payload) = parse(reader)?;
    decode_payload(descriptor, payload, support)
}
