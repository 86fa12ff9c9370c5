//! Thumbnail chunk (`0x03043007`).
//!
//! The thumbnail and comments are wrapped in XML-like markers that are
//! stepped over rather than parsed:
//!
//! ```text
//! u32 has_thumbnail
//! u32 thumbnail_len
//! "<Thumbnail.jpg>"             15 bytes
//! thumbnail bytes               thumbnail_len bytes
//! "</Thumbnail.jpg><Comments>"  26 bytes
//! string comments
//! "</Comments>"                 11 bytes
//! ```
//!
//! Without a thumbnail the rest of the chunk is skipped by its declared size.

use std::io::{Read, Seek};

use super::DecodeContext;
use crate::error::Result;

/// Width of the `has_thumbnail` flag.
const FLAG_SIZE: u32 = 4;

/// `<Thumbnail.jpg>`
const THUMBNAIL_OPEN_TAG: u64 = 15;

/// `</Thumbnail.jpg>` followed by `<Comments>`.
const THUMBNAIL_CLOSE_COMMENTS_OPEN_TAG: u64 = 16 + 10;

/// `</Comments>`
const COMMENTS_CLOSE_TAG: u64 = 11;

pub(crate) fn decode<R: Read + Seek>(ctx: &mut DecodeContext<R>, declared_size: u32) -> Result<()> {
    ctx.map.has_thumbnail = ctx.read_flag()?;

    if !ctx.map.has_thumbnail {
        return ctx.skip(u64::from(declared_size.saturating_sub(FLAG_SIZE)));
    }

    let thumbnail_len = ctx.read_u32()?;

    ctx.skip(THUMBNAIL_OPEN_TAG)?;
    ctx.map.thumbnail = ctx.reader.read_bytes(thumbnail_len as usize)?;
    ctx.skip(THUMBNAIL_CLOSE_COMMENTS_OPEN_TAG)?;

    ctx.map.comments = ctx.read_string()?;

    ctx.skip(COMMENTS_CLOSE_TAG)
}
