//! Entry points for decoding map headers.
//!
//! All three entry points share the same pipeline:
//!
//! 1. Check the class identifier at offset 9 ([`check_class_id`])
//! 2. Read the header chunk table ([`ChunkTable::parse`])
//! 3. Decode each chunk in table order ([`decode_chunks`])
//!
//! Each call owns its own lookback state and output record, so decodes are
//! independent of each other. The stream is consumed by the call and
//! dropped when it returns, on success and failure alike.
//!
//! # Example
//!
//! ```no_run
//! use gbx_map_parser::parser::read_file;
//!
//! let map = read_file("Tiger Blood.Map.Gbx")?;
//! println!("{} by {}", map.name, map.author_nick_name);
//! # Ok::<(), gbx_map_parser::error::ParserError>(())
//! ```

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use tracing::debug;

use crate::binary::GbxReader;
use crate::chunks::{decode_chunks, ChunkTable, DecodeContext};
use crate::error::Result;
use crate::format::check_class_id;
use crate::map::MapInfo;

/// Decodes the header of the map file at `path`.
///
/// # Errors
///
/// - `ParserError::IoError` if the file cannot be opened
/// - any error from [`read_stream`]
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<MapInfo> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening map file");

    let file = File::open(path)?;
    read_stream(BufReader::new(file))
}

/// Decodes the header of a map file held in memory.
///
/// # Errors
///
/// See [`read_stream`].
pub fn read_bytes(bytes: &[u8]) -> Result<MapInfo> {
    read_stream(Cursor::new(bytes))
}

/// Decodes the header of a map file from a seekable stream.
///
/// The class identifier is looked up at absolute offset 9, wherever the
/// stream is currently positioned. Pass `&mut stream` to keep using the
/// stream afterwards.
///
/// # Errors
///
/// - `ParserError::UnsupportedFormat` if the file is not a map
/// - `ParserError::TruncatedStream` if the header is cut off
/// - `ParserError::LookbackIndexOutOfRange` /
///   `ParserError::UnknownPredefinedLookback` for bad lookback strings
/// - `ParserError::MalformedString` for non-UTF-8 text
pub fn read_stream<R: Read + Seek>(stream: R) -> Result<MapInfo> {
    let mut reader = GbxReader::new(stream)?;
    check_class_id(&mut reader)?;

    let table = ChunkTable::parse(&mut reader)?;

    let mut ctx = DecodeContext::new(reader);
    decode_chunks(&mut ctx, &table)?;

    Ok(ctx.into_map())
}

/// Checks the class identifier and reads the header chunk table without
/// decoding any chunk body.
///
/// # Errors
///
/// - `ParserError::UnsupportedFormat` if the file is not a map
/// - `ParserError::TruncatedStream` if the table is cut off
pub fn read_chunk_table<R: Read + Seek>(stream: R) -> Result<ChunkTable> {
    let mut reader = GbxReader::new(stream)?;
    check_class_id(&mut reader)?;
    ChunkTable::parse(&mut reader)
}
