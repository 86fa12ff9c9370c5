//! Author info chunk (`0x03043008`).
//!
//! # Layout
//!
//! | Size | Field |
//! |------|-------|
//! | 4 | reserved (chunk version) |
//! | 4 | author version |
//! | string | author login (same as in the summary chunk) |
//! | string | author nickname |
//! | string | author zone |
//! | string | author extra info |

use std::io::{Read, Seek};

use super::DecodeContext;
use crate::error::Result;

const LEADING_RESERVED: u64 = 4;

pub(crate) fn decode<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<()> {
    ctx.skip(LEADING_RESERVED)?;

    ctx.map.author_version = ctx.read_u32()?;

    // Already taken from the summary chunk
    ctx.read_string()?;

    ctx.map.author_nick_name = ctx.read_string()?;
    ctx.map.author_zone = ctx.read_string()?;
    ctx.map.author_extra = ctx.read_string()?;

    Ok(())
}
