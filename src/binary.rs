//! Binary reading utilities for parsing GBX files.
//!
//! [`GbxReader`] wraps any seekable stream and provides the primitive reads
//! the chunk decoders are built from: little-endian `u32` values, raw byte
//! runs, length-prefixed UTF-8 strings and forward skips. The reader tracks
//! its own offset and the stream length, so every read and skip is bounds
//! checked and reports [`ParserError::TruncatedStream`] when the input runs
//! out.
//!
//! # Endianness
//!
//! All GBX integers are little-endian. Values are decoded with
//! [`u32::from_le_bytes`], independent of host byte order.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use gbx_map_parser::binary::GbxReader;
//!
//! let data = [0x2A, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, b'H', b'i'];
//! let mut reader = GbxReader::new(Cursor::new(&data[..])).unwrap();
//!
//! assert_eq!(reader.read_u32_le().unwrap(), 42);
//! assert_eq!(reader.read_string().unwrap(), "Hi");
//! assert_eq!(reader.remaining(), 0);
//! ```

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::error::{ParserError, Result};

/// Forward-only reader over a seekable GBX byte stream.
#[derive(Debug)]
pub struct GbxReader<R> {
    inner: R,
    pos: u64,
    len: u64,
}

impl<R: Read + Seek> GbxReader<R> {
    /// Wraps a stream, starting at its current position.
    ///
    /// The stream length is measured once up front.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::IoError` if the stream cannot be seeked.
    pub fn new(mut inner: R) -> Result<Self> {
        let pos = inner.stream_position()?;
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(pos))?;

        Ok(Self { inner, pos, len })
    }

    /// Returns the current offset from the start of the stream.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Returns the total length of the stream in bytes.
    #[must_use]
    pub fn stream_len(&self) -> u64 {
        self.len
    }

    /// Returns the number of bytes left after the current offset.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    /// Unwraps the reader, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Moves to an absolute offset.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::TruncatedStream` if `offset` lies past the end
    /// of the stream.
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        if offset > self.len {
            return Err(ParserError::truncated(0, offset, self.len));
        }

        self.inner.seek(SeekFrom::Start(offset))?;
        self.pos = offset;
        Ok(())
    }

    /// Advances by `len` bytes without decoding them.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::TruncatedStream` if fewer than `len` bytes
    /// remain.
    pub fn skip(&mut self, len: u64) -> Result<()> {
        self.ensure(len)?;

        let target = self.pos + len;
        self.inner.seek(SeekFrom::Start(target))?;
        self.pos = target;
        Ok(())
    }

    /// Reads a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::TruncatedStream` if fewer than 4 bytes remain.
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let mut raw = [0u8; 4];
        self.fill(&mut raw)?;
        Ok(u32::from_le_bytes(raw))
    }

    /// Reads exactly `len` bytes verbatim.
    ///
    /// The remaining length is checked before anything is allocated, so a
    /// corrupt length field cannot trigger a huge allocation.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::TruncatedStream` if fewer than `len` bytes
    /// remain.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        self.ensure(len as u64)?;

        let mut buf = vec![0u8; len];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Reads a string stored as a `u32` byte length followed by UTF-8 data.
    ///
    /// # Errors
    ///
    /// - `ParserError::TruncatedStream` if the length or payload is cut off
    /// - `ParserError::MalformedString` if the payload is not valid UTF-8
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32_le()?;
        let offset = self.pos;
        let bytes = self.read_bytes(len as usize)?;

        String::from_utf8(bytes).map_err(|source| ParserError::MalformedString { offset, source })
    }

    fn ensure(&self, len: u64) -> Result<()> {
        let available = self.remaining();
        if len > available {
            return Err(ParserError::truncated(self.pos, len, available));
        }
        Ok(())
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        let start = self.pos;
        let available = self.remaining();
        let wanted = buf.len() as u64;

        self.inner.read_exact(buf).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                ParserError::truncated(start, wanted, available)
            } else {
                ParserError::IoError(e)
            }
        })?;

        self.pos += wanted;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(data: &[u8]) -> GbxReader<Cursor<&[u8]>> {
        GbxReader::new(Cursor::new(data)).unwrap()
    }

    // ========================
    // read_u32_le tests
    // ========================

    #[test]
    fn test_read_u32_le_basic() {
        let mut r = reader(&[0x78, 0x56, 0x34, 0x12]);
        assert_eq!(r.read_u32_le().unwrap(), 0x1234_5678);
        assert_eq!(r.position(), 4);
    }

    #[test]
    fn test_read_u32_le_class_id() {
        // Map class id 0x03043000 as stored on disk
        let mut r = reader(&[0x00, 0x30, 0x04, 0x03]);
        assert_eq!(r.read_u32_le().unwrap(), 0x0304_3000);
    }

    #[test]
    fn test_read_u32_le_too_short() {
        let mut r = reader(&[0x78, 0x56, 0x34]);
        let result = r.read_u32_le();
        assert!(matches!(
            result,
            Err(ParserError::TruncatedStream {
                offset: 0,
                expected: 4,
                available: 3
            })
        ));
    }

    #[test]
    fn test_read_u32_le_sequence() {
        let mut r = reader(&[1, 0, 0, 0, 2, 0, 0, 0]);
        assert_eq!(r.read_u32_le().unwrap(), 1);
        assert_eq!(r.read_u32_le().unwrap(), 2);
        assert!(r.read_u32_le().unwrap_err().is_truncated());
    }

    // ========================
    // read_bytes tests
    // ========================

    #[test]
    fn test_read_bytes_basic() {
        let mut r = reader(b"\xFF\xD8\xFF\xE0rest");
        assert_eq!(r.read_bytes(4).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(r.remaining(), 4);
    }

    #[test]
    fn test_read_bytes_zero_length() {
        let mut r = reader(b"GBX");
        assert!(r.read_bytes(0).unwrap().is_empty());
        assert_eq!(r.position(), 0);
    }

    #[test]
    fn test_read_bytes_overflow() {
        let mut r = reader(b"GBX");
        let result = r.read_bytes(usize::MAX >> 1);
        assert!(matches!(
            result,
            Err(ParserError::TruncatedStream { available: 3, .. })
        ));
        // Nothing consumed on failure
        assert_eq!(r.position(), 0);
    }

    // ========================
    // read_string tests
    // ========================

    #[test]
    fn test_read_string_basic() {
        let mut r = reader(b"\x05\x00\x00\x00Hello");
        assert_eq!(r.read_string().unwrap(), "Hello");
    }

    #[test]
    fn test_read_string_empty() {
        let mut r = reader(&[0, 0, 0, 0]);
        assert_eq!(r.read_string().unwrap(), "");
        assert_eq!(r.position(), 4);
    }

    #[test]
    fn test_read_string_multibyte() {
        let text = "$o$f00Crème";
        let mut data = (text.len() as u32).to_le_bytes().to_vec();
        data.extend_from_slice(text.as_bytes());

        let mut r = reader(&data);
        assert_eq!(r.read_string().unwrap(), text);
    }

    #[test]
    fn test_read_string_truncated_payload() {
        let mut r = reader(b"\x0A\x00\x00\x00Hi");
        let result = r.read_string();
        assert!(matches!(
            result,
            Err(ParserError::TruncatedStream {
                offset: 4,
                expected: 10,
                available: 2
            })
        ));
    }

    #[test]
    fn test_read_string_invalid_utf8() {
        let mut r = reader(&[0x02, 0x00, 0x00, 0x00, 0xFF, 0xFE]);
        let result = r.read_string();
        assert!(matches!(
            result,
            Err(ParserError::MalformedString { offset: 4, .. })
        ));
    }

    // ========================
    // skip / seek tests
    // ========================

    #[test]
    fn test_skip_advances() {
        let mut r = reader(&[0xAA, 0xBB, 0xCC, 0xDD, 0x07, 0x00, 0x00, 0x00]);
        r.skip(4).unwrap();
        assert_eq!(r.position(), 4);
        assert_eq!(r.read_u32_le().unwrap(), 7);
    }

    #[test]
    fn test_skip_to_end() {
        let mut r = reader(&[0u8; 6]);
        r.skip(6).unwrap();
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_skip_past_end() {
        let mut r = reader(&[0u8; 6]);
        r.skip(2).unwrap();
        let result = r.skip(5);
        assert!(matches!(
            result,
            Err(ParserError::TruncatedStream {
                offset: 2,
                expected: 5,
                available: 4
            })
        ));
    }

    #[test]
    fn test_seek_to() {
        let mut data = vec![0u8; 9];
        data.extend_from_slice(&0x0304_3000u32.to_le_bytes());

        let mut r = reader(&data);
        r.seek_to(9).unwrap();
        assert_eq!(r.read_u32_le().unwrap(), 0x0304_3000);
    }

    #[test]
    fn test_seek_to_past_end() {
        let mut r = reader(&[0u8; 5]);
        assert!(r.seek_to(9).unwrap_err().is_truncated());
    }

    #[test]
    fn test_new_keeps_stream_position() {
        let mut cursor = Cursor::new(vec![0u8, 0, 3, 0, 0, 0]);
        cursor.set_position(2);

        let mut r = GbxReader::new(cursor).unwrap();
        assert_eq!(r.position(), 2);
        assert_eq!(r.stream_len(), 6);
        assert_eq!(r.read_u32_le().unwrap(), 3);
    }
}
