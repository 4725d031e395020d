//! Sequential cursor over a RIFF byte stream
//!
//! RIFF containers are little-endian and chunk-oriented, so all the parser
//! needs from the transport is fixed-width reads, tag reads, byte runs, and
//! forward skips over chunks it does not understand.

use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

/// Scratch buffer size for the discard-skip path
const SKIP_CHUNK_LEN: usize = 512;

/// Forward-only cursor over a byte stream
///
/// All multi-byte reads are little-endian. A read or skip that runs past the
/// end of input fails with [`Error::TruncatedStream`]; the cursor is not
/// usable afterwards.
pub struct ChunkReader<R> {
    inner: R,
}

impl<R: Read> ChunkReader<R> {
    /// Create a cursor over a readable stream
    pub fn new(inner: R) -> Self {
        ChunkReader { inner }
    }

    /// Unwrap the cursor, returning the underlying stream
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read a little-endian unsigned 16-bit integer
    pub fn read_u16(&mut self) -> Result<u16> {
        self.inner
            .read_u16::<LittleEndian>()
            .map_err(|e| Error::from_read(e, "while reading a 16-bit field"))
    }

    /// Read a little-endian unsigned 32-bit integer
    pub fn read_u32(&mut self) -> Result<u32> {
        self.inner
            .read_u32::<LittleEndian>()
            .map_err(|e| Error::from_read(e, "while reading a 32-bit field"))
    }

    /// Read a 4-byte chunk tag
    pub fn read_tag(&mut self) -> Result<[u8; 4]> {
        let mut tag = [0u8; 4];
        self.inner
            .read_exact(&mut tag)
            .map_err(|e| Error::from_read(e, "while reading a chunk tag"))?;
        Ok(tag)
    }

    /// Read exactly `len` bytes
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.inner
            .read_exact(&mut buf)
            .map_err(|e| Error::from_read(e, "while reading chunk payload"))?;
        Ok(buf)
    }

    /// Skip `count` bytes by reading and discarding them
    ///
    /// Works on any readable stream. [`ChunkReader::skip_seek`] is the
    /// seek-based equivalent; the two observe the same failures.
    pub fn skip(&mut self, count: u64) -> Result<()> {
        let mut scratch = [0u8; SKIP_CHUNK_LEN];
        let mut remaining = count;

        while remaining > 0 {
            let step = remaining.min(SKIP_CHUNK_LEN as u64) as usize;
            self.inner
                .read_exact(&mut scratch[..step])
                .map_err(|e| Error::from_read(e, "while skipping chunk bytes"))?;
            remaining -= step as u64;
        }

        Ok(())
    }
}

impl<R: Read + Seek> ChunkReader<R> {
    /// Skip `count` bytes by seeking forward
    ///
    /// Behaviorally identical to [`ChunkReader::skip`], including the
    /// truncation failure when the skip would pass the end of the stream.
    pub fn skip_seek(&mut self, count: u64) -> Result<()> {
        let pos = self.inner.stream_position()?;
        let end = self.inner.seek(SeekFrom::End(0))?;

        if pos.saturating_add(count) > end {
            return Err(Error::truncated("while skipping chunk bytes"));
        }

        self.inner.seek(SeekFrom::Start(pos + count))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_fixed_width_reads() {
        let data = vec![0x34, 0x12, 0x78, 0x56, 0x34, 0x12];
        let mut reader = ChunkReader::new(Cursor::new(data));

        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 0x12345678);
    }

    #[test]
    fn test_tag_and_byte_run() {
        let data = b"RIFFabcd".to_vec();
        let mut reader = ChunkReader::new(Cursor::new(data));

        assert_eq!(&reader.read_tag().unwrap(), b"RIFF");
        assert_eq!(reader.read_bytes(4).unwrap(), b"abcd");
        assert_eq!(reader.into_inner().position(), 8);
    }

    #[test]
    fn test_read_past_end_is_truncation() {
        let mut reader = ChunkReader::new(Cursor::new(vec![0u8; 3]));
        assert!(matches!(
            reader.read_u32(),
            Err(Error::TruncatedStream(_))
        ));
    }

    #[test]
    fn test_skip_and_skip_seek_agree() {
        let data: Vec<u8> = (0u8..32).collect();

        let mut discard = ChunkReader::new(Cursor::new(data.clone()));
        discard.skip(10).unwrap();
        assert_eq!(discard.read_u16().unwrap(), u16::from_le_bytes([10, 11]));

        let mut seeking = ChunkReader::new(Cursor::new(data));
        seeking.skip_seek(10).unwrap();
        assert_eq!(seeking.read_u16().unwrap(), u16::from_le_bytes([10, 11]));
    }

    #[test]
    fn test_skip_past_end_is_truncation() {
        let mut discard = ChunkReader::new(Cursor::new(vec![0u8; 8]));
        assert!(matches!(discard.skip(9), Err(Error::TruncatedStream(_))));

        let mut seeking = ChunkReader::new(Cursor::new(vec![0u8; 8]));
        assert!(matches!(
            seeking.skip_seek(9),
            Err(Error::TruncatedStream(_))
        ));
    }

    #[test]
    fn test_skip_longer_than_scratch_buffer() {
        let len = SKIP_CHUNK_LEN * 2 + 17;
        let mut data = vec![0u8; len];
        data.push(0xAB);

        let mut reader = ChunkReader::new(Cursor::new(data));
        reader.skip(len as u64).unwrap();
        assert_eq!(reader.read_bytes(1).unwrap(), vec![0xAB]);
    }
}
