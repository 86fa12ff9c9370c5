//! XML header chunk (`0x03043005`): a single length-prefixed string, kept
//! verbatim.

use std::io::{Read, Seek};

use super::DecodeContext;
use crate::error::Result;

pub(crate) fn decode<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<()> {
    ctx.map.header_xml = ctx.read_string()?;
    Ok(())
}
