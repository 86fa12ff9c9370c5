//! Error types for the GBX map parser.
//!
//! Every failure is terminal for the decode call that raised it: the parser
//! never returns a partially filled [`MapInfo`](crate::map::MapInfo).

use thiserror::Error;

/// The main error type for GBX map parsing operations.
///
/// # Example
///
/// ```
/// use gbx_map_parser::error::{ParserError, Result};
///
/// fn example_operation() -> Result<()> {
///     Err(ParserError::UnknownPredefinedLookback { index: 5 })
/// }
///
/// assert!(example_operation().is_err());
/// ```
#[derive(Error, Debug)]
pub enum ParserError {
    /// An I/O error occurred while reading the underlying stream.
    ///
    /// End-of-data is reported as [`ParserError::TruncatedStream`] instead.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The class identifier at offset 9 is not the map class.
    #[error("Unsupported format: expected class id 0x{expected:08X}, found 0x{found:08X}")]
    UnsupportedFormat {
        /// The map class identifier.
        expected: u32,
        /// The class identifier read from the file.
        found: u32,
    },

    /// A read needed more bytes than remained in the stream.
    #[error(
        "Truncated stream at offset {offset}: expected {expected} bytes, but only {available} available"
    )]
    TruncatedStream {
        /// Stream offset where the read started.
        offset: u64,
        /// Number of bytes the read needed.
        expected: u64,
        /// Number of bytes left in the stream.
        available: u64,
    },

    /// A lookback back-reference pointed outside the current chunk's store.
    #[error("Lookback index {index} out of range: store holds {len} strings")]
    LookbackIndexOutOfRange {
        /// The 1-based index taken from the stream (high bits masked off).
        index: u32,
        /// Number of strings in the store when the reference was read.
        len: usize,
    },

    /// A predefined lookback index is not in the known table.
    #[error("Unknown predefined lookback string index {index}")]
    UnknownPredefinedLookback {
        /// The raw index read from the stream.
        index: u32,
    },

    /// A length-prefixed string was not valid UTF-8.
    #[error("Malformed string at offset {offset}: {source}")]
    MalformedString {
        /// Stream offset of the string payload.
        offset: u64,
        /// The UTF-8 decoding failure.
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl ParserError {
    /// Creates a `TruncatedStream` error.
    ///
    /// # Arguments
    ///
    /// * `offset` - Where the failing read started
    /// * `expected` - The number of bytes that were needed
    /// * `available` - The number of bytes actually available
    #[must_use]
    pub fn truncated(offset: u64, expected: u64, available: u64) -> Self {
        ParserError::TruncatedStream {
            offset,
            expected,
            available,
        }
    }

    /// Returns whether this error was caused by running out of input.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, ParserError::TruncatedStream { .. })
    }
}

/// A specialized Result type for GBX parsing operations.
pub type Result<T> = std::result::Result<T, ParserError>;
