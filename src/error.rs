//! Error types for wavcore

use thiserror::Error;

/// Result type alias for wavcore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wavcore
///
/// Every variant is fatal to the current parse or decode call; the crate
/// performs no retries and returns no partial results.
#[derive(Error, Debug)]
pub enum Error {
    /// The stream is not a RIFF/WAVE container
    #[error("not a WAVE file: {0}")]
    NotAWaveFile(String),

    /// A read or skip ran past the available input
    #[error("truncated stream: {0}")]
    TruncatedStream(String),

    /// Format code outside the recognized set (PCM, MS-ADPCM, IEEE float, IMA4)
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Channel count outside {1, 2}
    #[error("unsupported channel count: {0}")]
    UnsupportedChannelCount(u16),

    /// Malformed input to a sample decoder
    #[error("invalid sample data: {0}")]
    InvalidSampleData(String),

    /// IO error other than end-of-input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a not-a-wave-file error
    pub fn not_a_wave_file<S: Into<String>>(msg: S) -> Self {
        Error::NotAWaveFile(msg.into())
    }

    /// Create a truncated-stream error
    pub fn truncated<S: Into<String>>(msg: S) -> Self {
        Error::TruncatedStream(msg.into())
    }

    /// Create an unsupported-format error
    pub fn unsupported_format<S: Into<String>>(msg: S) -> Self {
        Error::UnsupportedFormat(msg.into())
    }

    /// Create an invalid-sample-data error
    pub fn invalid_sample_data<S: Into<String>>(msg: S) -> Self {
        Error::InvalidSampleData(msg.into())
    }

    /// Map an IO error, folding end-of-input into `TruncatedStream`
    pub(crate) fn from_read(err: std::io::Error, context: &str) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::TruncatedStream(context.to_string())
        } else {
            Error::Io(err)
        }
    }
}
