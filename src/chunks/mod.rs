//! Header chunk table and chunk decoding.
//!
//! Right after the class identifier a map file lists its header chunks:
//!
//! | Size | Field |
//! |------|-------|
//! | 4 | total header byte length (informational) |
//! | 4 | chunk count `n` |
//! | 8 × n | (`u32` chunk id, `u32` size) pairs |
//!
//! Bit 31 of a size marks a "heavy" chunk and is not part of the length.
//! The chunk bodies follow back to back, in table order.
//!
//! [`decode_chunks`] walks the table, resets the lookback state before each
//! chunk, and hands the chunk to its decoder. Chunks that are not decoded are
//! skipped by their declared size.

pub mod author;
pub mod base;
pub mod summary;
pub mod thumbnail;
pub mod xml;

use std::io::{Read, Seek};

use indexmap::IndexMap;
use tracing::debug;

use crate::binary::GbxReader;
use crate::error::Result;
use crate::format::ChunkKind;
use crate::lookback::LookbackTable;
use crate::map::MapInfo;

/// Bit 31 of a declared chunk size: the "heavy" marker.
pub const HEAVY_CHUNK_FLAG: u32 = 0x8000_0000;

/// One row of the header chunk table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkEntry {
    /// Raw chunk identifier.
    pub id: u32,

    /// Declared byte size with the heavy bit cleared.
    pub size: u32,

    /// Whether the heavy bit was set.
    pub heavy: bool,
}

impl ChunkEntry {
    /// Splits a raw (id, size) pair from the table.
    #[must_use]
    pub fn from_raw(id: u32, raw_size: u32) -> Self {
        Self {
            id,
            size: raw_size & !HEAVY_CHUNK_FLAG,
            heavy: raw_size & HEAVY_CHUNK_FLAG != 0,
        }
    }

    /// Returns the chunk kind, or `None` for an unrecognized identifier.
    #[must_use]
    pub fn kind(&self) -> Option<ChunkKind> {
        ChunkKind::from_id(self.id)
    }
}

/// The header chunk table, keyed by chunk id.
///
/// Entries keep the position where their id first appeared; a repeated id
/// replaces the earlier entry's size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkTable {
    /// Total header byte length as declared by the file.
    pub header_length: u32,

    entries: IndexMap<u32, ChunkEntry>,
}

impl ChunkTable {
    /// Reads the table from the current reader position.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::TruncatedStream` if the table is cut off.
    pub fn parse<R: Read + Seek>(reader: &mut GbxReader<R>) -> Result<Self> {
        let header_length = reader.read_u32_le()?;
        let count = reader.read_u32_le()?;
        debug!(header_length, count, "reading header chunk table");

        let mut entries = IndexMap::new();
        for _ in 0..count {
            let id = reader.read_u32_le()?;
            let raw_size = reader.read_u32_le()?;
            entries.insert(id, ChunkEntry::from_raw(id, raw_size));
        }

        Ok(Self {
            header_length,
            entries,
        })
    }

    /// Returns the number of distinct chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table lists no chunks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a chunk by raw identifier.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&ChunkEntry> {
        self.entries.get(&id)
    }

    /// Returns whether a chunk of the given kind is listed.
    #[must_use]
    pub fn contains(&self, kind: ChunkKind) -> bool {
        self.entries.contains_key(&kind.id())
    }

    /// Iterates over the entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &ChunkEntry> {
        self.entries.values()
    }
}

/// State threaded through the chunk decoders of one decode call.
#[derive(Debug)]
pub struct DecodeContext<R> {
    reader: GbxReader<R>,
    lookback: LookbackTable,
    map: MapInfo,
}

impl<R: Read + Seek> DecodeContext<R> {
    /// Starts a decode with a fresh lookback table and an empty record.
    #[must_use]
    pub fn new(reader: GbxReader<R>) -> Self {
        Self {
            reader,
            lookback: LookbackTable::new(),
            map: MapInfo::default(),
        }
    }

    /// Returns the decoded record so far.
    #[must_use]
    pub fn map(&self) -> &MapInfo {
        &self.map
    }

    /// Returns the underlying reader.
    pub fn reader_mut(&mut self) -> &mut GbxReader<R> {
        &mut self.reader
    }

    /// Finishes the decode and returns the record.
    #[must_use]
    pub fn into_map(self) -> MapInfo {
        self.map
    }

    fn begin_chunk(&mut self) {
        self.lookback.reset();
    }

    fn read_u32(&mut self) -> Result<u32> {
        self.reader.read_u32_le()
    }

    fn read_flag(&mut self) -> Result<bool> {
        Ok(self.reader.read_u32_le()? == 1)
    }

    fn read_string(&mut self) -> Result<String> {
        self.reader.read_string()
    }

    fn read_lookback_string(&mut self) -> Result<String> {
        self.lookback.read(&mut self.reader)
    }

    fn skip(&mut self, len: u64) -> Result<()> {
        self.reader.skip(len)
    }
}

/// Decodes every chunk listed in `table`, in table order.
///
/// The reader must be positioned at the first chunk body.
///
/// # Errors
///
/// Propagates the first error raised by a decoder or a skip; no partial
/// results are kept.
pub fn decode_chunks<R: Read + Seek>(ctx: &mut DecodeContext<R>, table: &ChunkTable) -> Result<()> {
    for entry in table.iter() {
        ctx.begin_chunk();

        let start = ctx.reader.position();
        let kind = entry.kind();
        debug!(
            id = format_args!("0x{:08X}", entry.id),
            size = entry.size,
            kind = kind.map_or("unrecognized", ChunkKind::name),
            offset = start,
            "decoding chunk"
        );

        match kind {
            Some(ChunkKind::MapBase) => base::decode(ctx)?,
            Some(ChunkKind::MapSummary) => summary::decode(ctx)?,
            Some(ChunkKind::XmlHeader) => xml::decode(ctx)?,
            Some(ChunkKind::Thumbnail) => thumbnail::decode(ctx, entry.size)?,
            Some(ChunkKind::AuthorInfo) => author::decode(ctx)?,
            Some(ChunkKind::Unknown) | None => ctx.skip(u64::from(entry.size))?,
        }

        let consumed = ctx.reader.position() - start;
        if consumed != u64::from(entry.size) {
            debug!(
                id = format_args!("0x{:08X}", entry.id),
                declared = entry.size,
                consumed,
                "chunk size mismatch"
            );
        }
    }

    Ok(())
}
