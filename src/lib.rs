//! wavcore - RIFF/WAVE parsing and sample decoding in pure Rust
//!
//! wavcore turns an arbitrary RIFF/WAVE byte stream into a flat buffer of
//! playable samples plus the metadata an audio backend needs to bind it:
//! integer PCM passes through, 24-bit PCM and 32-bit float PCM are
//! down-converted to 16-bit, and IMA4 ADPCM is block-decompressed. Backends
//! that bind compressed or float payloads natively receive them verbatim.
//!
//! # Architecture
//!
//! - `format`: RIFF chunk cursor and WAVE container parsing
//! - `codec`: sample down-converters, the IMA4 decoder, and backend dispatch
//! - `error`: the crate-wide error taxonomy
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::BufReader;
//! use wavcore::{decode_stream, BackendSupport};
//!
//! # fn main() -> wavcore::Result<()> {
//! let file = BufReader::new(File::open("clip.wav")?);
//! let audio = decode_stream(file, &BackendSupport::default())?;
//! println!(
//!     "{:?}, {} Hz, {} bytes",
//!     audio.format, audio.descriptor.sample_rate, audio.data.len()
//! );
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod error;
pub mod format;

pub use codec::{
    decode_payload, decode_stream, BackendSupport, BufferFormat, DecodedAudio, Ima4Decoder,
};
pub use error::{Error, Result};
pub use format::wav::{parse, FormatTag, WaveFormatDescriptor};

/// wavcore version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
