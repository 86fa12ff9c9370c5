//! Class identification and chunk identifiers for GBX map files.
//!
//! A GBX file starts with a short preamble (`"GBX"`, a 16-bit version and
//! four format bytes) followed by the 32-bit class identifier of the object
//! it contains. Map files carry the `CGameCtnChallenge` class, identified by
//! engine `0x03` and class `0x043`.
//!
//! The header chunks of a map are identified by the class id plus a chunk
//! index in the low 12 bits. Only the handful listed in [`ChunkKind`] are
//! decoded; everything else is skipped by its declared size.
//!
//! # Example
//!
//! ```
//! use gbx_map_parser::format::{ChunkKind, MAP_CLASS_ID};
//!
//! assert_eq!(MAP_CLASS_ID, 0x0304_3000);
//! assert_eq!(ChunkKind::from_id(0x0304_3003), Some(ChunkKind::MapSummary));
//! assert_eq!(ChunkKind::from_id(0x0304_3006), None);
//! ```

use std::io::{Read, Seek};

use crate::binary::GbxReader;
use crate::error::{ParserError, Result};

/// Byte offset of the class identifier, right after the preamble.
pub const CLASS_ID_OFFSET: u64 = 9;

/// Engine part of the map class identifier.
const MAP_ENGINE: u32 = 0x03;

/// Class part of the map class identifier.
const MAP_CLASS: u32 = 0x43;

/// Class identifier of map files (`CGameCtnChallenge`).
pub const MAP_CLASS_ID: u32 = (MAP_ENGINE << 24) | (MAP_CLASS << 12);

/// Header chunks the parser knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ChunkKind {
    /// Medal times, price, lap and checkpoint counts, editor mode.
    MapBase = MAP_CLASS_ID | 0x002,

    /// UId, environment, author login, name, mood, decoration, map type.
    MapSummary = MAP_CLASS_ID | 0x003,

    /// Known but never interpreted; always skipped by declared size.
    Unknown = MAP_CLASS_ID | 0x004,

    /// XML rendition of the header.
    XmlHeader = MAP_CLASS_ID | 0x005,

    /// JPEG thumbnail and map comments.
    Thumbnail = MAP_CLASS_ID | 0x007,

    /// Author version, nickname, zone and extra info.
    AuthorInfo = MAP_CLASS_ID | 0x008,
}

impl ChunkKind {
    /// All recognized chunk kinds, in identifier order.
    pub const ALL: [ChunkKind; 6] = [
        ChunkKind::MapBase,
        ChunkKind::MapSummary,
        ChunkKind::Unknown,
        ChunkKind::XmlHeader,
        ChunkKind::Thumbnail,
        ChunkKind::AuthorInfo,
    ];

    /// Maps a raw chunk identifier to a known kind.
    ///
    /// Returns `None` for identifiers outside the known set; callers treat
    /// those like [`ChunkKind::Unknown`].
    #[must_use]
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Returns the raw chunk identifier.
    #[must_use]
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Returns a short display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ChunkKind::MapBase => "MapBase",
            ChunkKind::MapSummary => "MapSummary",
            ChunkKind::Unknown => "Unknown",
            ChunkKind::XmlHeader => "XmlHeader",
            ChunkKind::Thumbnail => "Thumbnail",
            ChunkKind::AuthorInfo => "AuthorInfo",
        }
    }
}

impl std::fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Seeks to the class identifier and checks that the stream holds a map.
///
/// On success the reader is left just past the class identifier, at the
/// start of the header chunk table.
///
/// # Errors
///
/// - `ParserError::TruncatedStream` if the stream is shorter than 13 bytes
/// - `ParserError::UnsupportedFormat` if the class identifier is not
///   [`MAP_CLASS_ID`]
pub fn check_class_id<R: Read + Seek>(reader: &mut GbxReader<R>) -> Result<u32> {
    reader.seek_to(CLASS_ID_OFFSET)?;
    let class_id = reader.read_u32_le()?;

    if class_id != MAP_CLASS_ID {
        return Err(ParserError::UnsupportedFormat {
            expected: MAP_CLASS_ID,
            found: class_id,
        });
    }

    Ok(class_id)
}
