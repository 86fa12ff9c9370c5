//! # GBX Map Parser
//!
//! Reads the header section of ManiaPlanet / TrackMania map files
//! (`.Map.Gbx`) and extracts map metadata without touching the compressed
//! game-data body: name, author, medal times, environment, thumbnail,
//! comments and more.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gbx_map_parser::error::Result;
//! use gbx_map_parser::map::format_race_time;
//!
//! fn show_map(data: &[u8]) -> Result<()> {
//!     let map = gbx_map_parser::read_bytes(data)?;
//!
//!     println!("Name: {}", map.name);
//!     println!("Author: {} ({})", map.author_login, map.author_nick_name);
//!     println!("Environment: {}", map.environment);
//!     println!("Author time: {}", format_race_time(map.author_time));
//!     if let Some(jpeg) = map.thumbnail() {
//!         println!("Thumbnail: {} bytes", jpeg.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`error`] - Error types and result alias for parser operations
//! - [`binary`] - Bounds-checked little-endian reader over a seekable stream
//! - [`lookback`] - Lookback string (string deduplication) decoding
//! - [`format`] - Map class identifier and known header chunk ids
//! - [`chunks`] - Header chunk table and per-chunk decoders
//! - [`map`] - The decoded [`MapInfo`] record
//! - [`parser`] - File, byte buffer and stream entry points
//!
//! ## Format Reference
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0x00 | 3 | `"GBX"` |
//! | 0x03 | 2 | version |
//! | 0x05 | 4 | format flags (`BUCR`) |
//! | 0x09 | 4 | class id (`0x03043000` for maps) |
//! | 0x0D | 4 | header byte length |
//! | 0x11 | 4 | header chunk count |
//! | 0x15 | 8 × n | chunk (id, size) table |
//!
//! Chunk bodies follow the table back to back. All integers are
//! little-endian.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod binary;
pub mod chunks;
pub mod error;
pub mod format;
pub mod lookback;
pub mod map;
pub mod parser;

// Re-export commonly used types at the crate root
pub use chunks::{ChunkEntry, ChunkTable};
pub use error::{ParserError, Result};
pub use format::{ChunkKind, MAP_CLASS_ID};
pub use lookback::{LookbackRef, LookbackTable};
pub use map::{EditorKind, MapInfo};
pub use parser::{read_bytes, read_chunk_table, read_file, read_stream};
