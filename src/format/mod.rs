//! Container format handling
//!
//! This module provides the byte-stream cursor and the RIFF/WAVE container
//! parser. Data flows one way: a readable stream goes in, a format
//! descriptor and the raw `data` payload come out.

pub mod riff;
pub mod wav;

pub use riff::ChunkReader;
pub use wav::{parse, FormatTag, WaveFormatDescriptor};
