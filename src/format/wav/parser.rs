//! RIFF/WAVE container parsing
//!
//! One forward pass over the chunk sequence: `fmt ` and (for IMA4) `fact`
//! populate the descriptor, `data` yields the payload and ends the walk,
//! everything else is skipped opaquely. The declared RIFF size and the fmt
//! chunk's own size field are read but never reconciled against the stream;
//! real-world WAV files miscount them routinely.

use super::header::{sample_alignment, FormatTag, WaveFormatDescriptor};
use super::{DATA_CHUNK, FACT_CHUNK, FMT_CHUNK, RIFF_MAGIC, WAVE_MAGIC};
use crate::error::{Error, Result};
use crate::format::riff::ChunkReader;
use bytes::Bytes;
use std::io::Read;
use tracing::{debug, trace};

/// Fields read from the `fmt ` chunk, pending the post-parse derivations
struct FmtFields {
    format_tag: FormatTag,
    channels: u16,
    sample_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
}

/// Parse a RIFF/WAVE stream into its format descriptor and raw `data` payload
///
/// The stream is consumed up to and including the `data` chunk; on error its
/// position is indeterminate. The payload is returned verbatim; run it
/// through [`crate::codec::decode_payload`] to obtain backend-ready samples.
pub fn parse<R: Read>(reader: R) -> Result<(WaveFormatDescriptor, Bytes)> {
    let mut reader = ChunkReader::new(reader);

    let tag = reader.read_tag()?;
    if &tag != RIFF_MAGIC {
        return Err(Error::not_a_wave_file(format!(
            "expected RIFF tag, found {:?}",
            String::from_utf8_lossy(&tag)
        )));
    }
    // declared size of the outer chunk; not used for bounds checks
    let _riff_size = reader.read_u32()?;

    let tag = reader.read_tag()?;
    if &tag != WAVE_MAGIC {
        return Err(Error::not_a_wave_file(format!(
            "expected WAVE tag, found {:?}",
            String::from_utf8_lossy(&tag)
        )));
    }

    let mut fmt: Option<FmtFields> = None;
    let mut samples_per_block: u32 = 0;
    let mut sample_count: u32 = 0;

    let payload = loop {
        let chunk_tag = reader.read_tag()?;
        let chunk_size = reader.read_u32()?;

        match &chunk_tag {
            FMT_CHUNK => {
                let format_code = reader.read_u16()?;
                let format_tag = FormatTag::from(format_code);
                if let FormatTag::Unknown(code) = format_tag {
                    return Err(Error::unsupported_format(format!(
                        "format code {:#06x}",
                        code
                    )));
                }

                let channels = reader.read_u16()?;
                if channels != 1 && channels != 2 {
                    return Err(Error::UnsupportedChannelCount(channels));
                }

                let sample_rate = reader.read_u32()?;
                let _byte_rate = reader.read_u32()?;
                let block_align = reader.read_u16()?;
                let bits_per_sample = reader.read_u16()?;

                if chunk_size > 16 {
                    // the extra region leads with its own size field; for
                    // IMA4 the first two extra bytes are samples per block
                    let mut extra = i64::from(reader.read_u16()?);
                    if format_tag == FormatTag::ImaAdpcm {
                        samples_per_block = u32::from(reader.read_u16()?);
                        extra -= 2;
                    }
                    if extra > 0 {
                        reader.skip(extra as u64)?;
                    }
                }

                fmt = Some(FmtFields {
                    format_tag,
                    channels,
                    sample_rate,
                    block_align,
                    bits_per_sample,
                });
            }
            FACT_CHUNK => {
                match &fmt {
                    Some(fields) if fields.format_tag == FormatTag::ImaAdpcm => {
                        let frames = reader.read_u32()?;
                        sample_count = frames * u32::from(fields.channels);
                        if chunk_size > 4 {
                            reader.skip(u64::from(chunk_size) - 4)?;
                        }
                    }
                    _ => {
                        trace!(size = chunk_size, "skipping fact chunk");
                        reader.skip(u64::from(chunk_size))?;
                    }
                }
            }
            DATA_CHUNK => {
                break Bytes::from(reader.read_bytes(chunk_size as usize)?);
            }
            other => {
                trace!(
                    tag = %String::from_utf8_lossy(other),
                    size = chunk_size,
                    "skipping unrecognized chunk"
                );
                reader.skip(u64::from(chunk_size))?;
            }
        }
    };

    let fields = fmt.ok_or_else(|| Error::not_a_wave_file("no fmt chunk before data"))?;

    if fields.sample_rate == 0 {
        return Err(Error::invalid_sample_data("sample rate must be positive"));
    }

    if samples_per_block == 0 {
        samples_per_block =
            sample_alignment(fields.format_tag, fields.channels, fields.block_align)?;
    }

    if sample_count == 0 {
        sample_count = derive_sample_count(&fields, samples_per_block, payload.len())?;
    }

    let descriptor = WaveFormatDescriptor {
        format_tag: fields.format_tag,
        channels: fields.channels,
        sample_rate: fields.sample_rate,
        block_align: fields.block_align,
        bits_per_sample: fields.bits_per_sample,
        samples_per_block,
        sample_count,
    };

    debug!(
        format = ?descriptor.format_tag,
        channels = descriptor.channels,
        sample_rate = descriptor.sample_rate,
        payload_len = payload.len(),
        "parsed WAVE stream"
    );

    Ok((descriptor, payload))
}

/// Derive the total sample count when no `fact` chunk supplied one
fn derive_sample_count(
    fields: &FmtFields,
    samples_per_block: u32,
    payload_len: usize,
) -> Result<u32> {
    if fields.format_tag.is_compressed() {
        let block_align = usize::from(fields.block_align);
        if block_align == 0 {
            return Err(Error::invalid_sample_data(
                "compressed stream with zero block alignment",
            ));
        }

        let full_blocks = (payload_len / block_align) as u32;
        let trailing = (payload_len % block_align) as u16;
        let trailing_samples = if trailing > 0 {
            sample_alignment(fields.format_tag, fields.channels, trailing)?
        } else {
            0
        };

        Ok(full_blocks * samples_per_block + trailing_samples)
    } else {
        let frame_size = usize::from(fields.channels) * usize::from(fields.bits_per_sample / 8);
        if frame_size == 0 {
            return Err(Error::invalid_sample_data(
                "uncompressed stream with zero frame size",
            ));
        }
        Ok((payload_len / frame_size) as u32)
    }
}
