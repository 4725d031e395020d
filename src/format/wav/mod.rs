//! WAV audio format support
//!
//! This module implements RIFF/WAVE container parsing: chunk walking,
//! format-descriptor extraction, and `data` payload capture. There is no
//! writing path; the parser extracts exactly what a playback backend needs
//! and skips all other chunks opaquely.

pub mod header;
pub mod parser;

pub use header::{sample_alignment, FormatTag, WaveFormatDescriptor};
pub use parser::parse;

/// WAV format magic numbers
pub const RIFF_MAGIC: &[u8; 4] = b"RIFF";
pub const WAVE_MAGIC: &[u8; 4] = b"WAVE";
pub const FMT_CHUNK: &[u8; 4] = b"fmt ";
pub const FACT_CHUNK: &[u8; 4] = b"fact";
pub const DATA_CHUNK: &[u8; 4] = b"data";
