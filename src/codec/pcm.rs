//! PCM bit-depth down-conversion
//!
//! Stateless converters that reduce 24-bit integer and 32-bit float PCM to
//! the 16-bit little-endian interleaved PCM the backend binds directly.
//! Both operate on indexed byte buffers; the input is never mutated.

use crate::error::{Error, Result};

/// Convert 24-bit little-endian PCM to 16-bit by dropping the low byte
///
/// A lossy truncation, not a rounding conversion. `count` bytes starting at
/// `offset` must cover whole 3-byte samples.
pub fn convert_24_to_16(data: &[u8], offset: usize, count: usize) -> Result<Vec<u8>> {
    if count % 3 != 0 {
        return Err(Error::invalid_sample_data(format!(
            "24-bit PCM length {} is not a multiple of 3",
            count
        )));
    }
    check_window(data, offset, count)?;

    let samples = count / 3;
    let mut out = Vec::with_capacity(samples * 2);

    for i in 0..samples {
        let base = offset + i * 3;
        out.push(data[base + 1]);
        out.push(data[base + 2]);
    }

    Ok(out)
}

/// Convert 32-bit IEEE float PCM to 16-bit signed integer PCM
///
/// Each float is scaled by 32767.0 and truncated toward zero. Inputs outside
/// `[-1.0, 1.0]` wrap through the cast rather than clamping; callers wanting
/// clamped output must limit the signal upstream.
pub fn convert_float_to_16(data: &[u8], offset: usize, count: usize) -> Result<Vec<u8>> {
    if count % 4 != 0 {
        return Err(Error::invalid_sample_data(format!(
            "float PCM length {} is not a multiple of 4",
            count
        )));
    }
    check_window(data, offset, count)?;

    let samples = count / 4;
    let mut out = Vec::with_capacity(samples * 2);

    for i in 0..samples {
        let base = offset + i * 4;
        let value = f32::from_le_bytes([
            data[base],
            data[base + 1],
            data[base + 2],
            data[base + 3],
        ]);
        // truncating cast; out-of-range input wraps instead of clamping
        let sample = (value * 32767.0) as i32 as i16;
        out.extend_from_slice(&sample.to_le_bytes());
    }

    Ok(out)
}

fn check_window(data: &[u8], offset: usize, count: usize) -> Result<()> {
    match offset.checked_add(count) {
        Some(end) if end <= data.len() => Ok(()),
        _ => Err(Error::invalid_sample_data(format!(
            "window {}+{} exceeds buffer of {} bytes",
            offset,
            count,
            data.len()
        ))),
    }
}
