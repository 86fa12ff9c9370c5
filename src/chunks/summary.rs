//! Summary chunk (`0x03043003`).
//!
//! # Layout
//!
//! | Size | Field |
//! |------|-------|
//! | 1 | reserved (chunk version) |
//! | lookback | UId |
//! | lookback | environment |
//! | lookback | author login |
//! | string | name |
//! | 5 | reserved |
//! | string | unused, always empty |
//! | lookback | mood |
//! | lookback | decoration environment id |
//! | lookback | decoration environment author |
//! | 32 | reserved (map origin, target and a 16-byte hash) |
//! | string | map type |
//! | string | map style |
//! | 9 | reserved |
//! | lookback | title id |
//!
//! The first lookback string is preceded by the lookback version.

use std::io::{Read, Seek};

use super::DecodeContext;
use crate::error::Result;

/// Chunk version byte.
const LEADING_RESERVED: u64 = 1;

/// Kind byte, locked flag and password length after the name.
const AFTER_NAME_RESERVED: u64 = 5;

/// Map origin and target (4 × u32) followed by a 16-byte hash.
const AFTER_DECORATION_RESERVED: u64 = 4 * 4 + 16;

/// Lightmap cache id (8 bytes) and lightmap version (1 byte).
const AFTER_MAP_STYLE_RESERVED: u64 = 9;

pub(crate) fn decode<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<()> {
    ctx.skip(LEADING_RESERVED)?;

    ctx.map.uid = ctx.read_lookback_string()?;
    ctx.map.environment = ctx.read_lookback_string()?;
    ctx.map.author_login = ctx.read_lookback_string()?;
    ctx.map.name = ctx.read_string()?;

    ctx.skip(AFTER_NAME_RESERVED)?;

    // Always encoded empty
    ctx.read_string()?;

    ctx.map.mood = ctx.read_lookback_string()?;
    ctx.map.decoration_environment_id = ctx.read_lookback_string()?;
    ctx.map.decoration_environment_author = ctx.read_lookback_string()?;

    ctx.skip(AFTER_DECORATION_RESERVED)?;

    ctx.map.map_type = ctx.read_string()?;
    ctx.map.map_style = ctx.read_string()?;

    ctx.skip(AFTER_MAP_STYLE_RESERVED)?;

    ctx.map.title_id = ctx.read_lookback_string()?;

    Ok(())
}
