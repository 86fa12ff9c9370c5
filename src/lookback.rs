//! Lookback string decoding.
//!
//! GBX files deduplicate identifier strings: the first occurrence of a
//! string is written in full and later occurrences refer back to it by a
//! 1-based index. A small set of well-known names can also be referenced
//! by a fixed numeric id without ever being written.
//!
//! The store is scoped to a single chunk. [`LookbackTable::reset`] must be
//! called before every chunk is decoded.
//!
//! # Wire format
//!
//! The first lookback string read in a chunk is preceded by a `u32` version.
//! Each string is then a `u32` index, classified in this exact order:
//!
//! | Index | Meaning |
//! |-------|---------|
//! | `0` | empty string |
//! | high bits set, low 30 bits zero | new string follows (length-prefixed) |
//! | `0xFFFFFFFF` | empty string ("no value") |
//! | high bits clear | predefined id (see [`predefined_lookback_string`]) |
//! | anything else | back-reference to store entry `(index & 0x3FFFFFFF) - 1` |
//!
//! The checks overlap, so the order matters.

use std::io::{Read, Seek};

use tracing::trace;

use crate::binary::GbxReader;
use crate::error::{ParserError, Result};

/// Bits flagging a stored (rather than predefined) lookback string.
pub const LOOKBACK_FLAG_MASK: u32 = 0xC000_0000;

/// Bits holding the store index or predefined id.
pub const LOOKBACK_INDEX_MASK: u32 = 0x3FFF_FFFF;

/// Explicit "no value" sentinel.
pub const LOOKBACK_NO_VALUE: u32 = 0xFFFF_FFFF;

/// Returns the name behind a predefined lookback id.
///
/// # Example
///
/// ```
/// use gbx_map_parser::lookback::predefined_lookback_string;
///
/// assert_eq!(predefined_lookback_string(11), Some("Valley"));
/// assert_eq!(predefined_lookback_string(5), None);
/// ```
#[must_use]
pub fn predefined_lookback_string(index: u32) -> Option<&'static str> {
    match index {
        11 => Some("Valley"),
        12 => Some("Canyon"),
        13 => Some("Lagoon"),
        17 => Some("TMCommon"),
        202 => Some("Storm"),
        299 => Some("SMCommon"),
        10003 => Some("Common"),
        _ => None,
    }
}

/// Classification of a raw lookback index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookbackRef {
    /// Index `0`.
    Empty,

    /// A new string follows and is appended to the store.
    NewString,

    /// The `0xFFFFFFFF` sentinel.
    NoValue,

    /// A predefined id.
    Predefined(u32),

    /// A 1-based reference into the store.
    BackReference(u32),
}

impl LookbackRef {
    /// Classifies a raw index read from the stream.
    ///
    /// # Example
    ///
    /// ```
    /// use gbx_map_parser::lookback::LookbackRef;
    ///
    /// assert_eq!(LookbackRef::classify(0x4000_0000), LookbackRef::NewString);
    /// assert_eq!(LookbackRef::classify(0x4000_0002), LookbackRef::BackReference(2));
    /// assert_eq!(LookbackRef::classify(12), LookbackRef::Predefined(12));
    /// ```
    #[must_use]
    pub fn classify(index: u32) -> Self {
        if index == 0 {
            LookbackRef::Empty
        } else if index & LOOKBACK_FLAG_MASK != 0 && index & LOOKBACK_INDEX_MASK == 0 {
            LookbackRef::NewString
        } else if index == LOOKBACK_NO_VALUE {
            LookbackRef::NoValue
        } else if index & LOOKBACK_INDEX_MASK == index {
            LookbackRef::Predefined(index)
        } else {
            LookbackRef::BackReference(index & LOOKBACK_INDEX_MASK)
        }
    }
}

/// Per-chunk lookback state: the lazily read version and the string store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookbackTable {
    version: Option<u32>,
    store: Vec<String>,
}

impl LookbackTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the version and the store.
    pub fn reset(&mut self) {
        self.version = None;
        self.store.clear();
    }

    /// Returns the version, if one has been read in this chunk.
    #[must_use]
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// Returns the strings stored so far, in insertion order.
    #[must_use]
    pub fn strings(&self) -> &[String] {
        &self.store
    }

    /// Reads one lookback string.
    ///
    /// # Errors
    ///
    /// - `ParserError::TruncatedStream` / `ParserError::MalformedString`
    ///   from the underlying reads
    /// - `ParserError::UnknownPredefinedLookback` for an id missing from the
    ///   predefined table
    /// - `ParserError::LookbackIndexOutOfRange` for a back-reference past
    ///   the end of the store
    pub fn read<R: Read + Seek>(&mut self, reader: &mut GbxReader<R>) -> Result<String> {
        if self.version.is_none() {
            let version = reader.read_u32_le()?;
            trace!(version, "lookback version");
            self.version = Some(version);
        }

        let index = reader.read_u32_le()?;

        match LookbackRef::classify(index) {
            LookbackRef::Empty | LookbackRef::NoValue => Ok(String::new()),
            LookbackRef::NewString => {
                let value = reader.read_string()?;
                trace!(slot = self.store.len() + 1, value = %value, "lookback new string");
                self.store.push(value.clone());
                Ok(value)
            }
            LookbackRef::Predefined(id) => predefined_lookback_string(id)
                .map(str::to_string)
                .ok_or(ParserError::UnknownPredefinedLookback { index: id }),
            LookbackRef::BackReference(slot) => {
                // slot is never 0 here: that pattern is a new string
                let position = (slot - 1) as usize;
                self.store
                    .get(position)
                    .cloned()
                    .ok_or_else(|| ParserError::LookbackIndexOutOfRange {
                        index: slot,
                        len: self.store.len(),
                    })
            }
        }
    }
}
