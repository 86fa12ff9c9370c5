//! Base chunk (`0x03043002`).
//!
//! # Layout
//!
//! | Size | Field |
//! |------|-------|
//! | 5 | reserved |
//! | 4 | bronze time (ms) |
//! | 4 | silver time (ms) |
//! | 4 | gold time (ms) |
//! | 4 | author time (ms) |
//! | 4 | price |
//! | 4 | multilap flag (1 = multilap) |
//! | 4 | map type id |
//! | 4 | reserved |
//! | 4 | author score |
//! | 4 | editor flag (1 = simple, else advanced) |
//! | 4 | reserved |
//! | 4 | checkpoint count |
//! | 4 | lap count |

use std::io::{Read, Seek};

use super::DecodeContext;
use crate::error::Result;
use crate::map::EditorKind;

/// Version byte and tracking flag ahead of the medal times.
const LEADING_RESERVED: u64 = 5;

/// Field between the map type and the author score.
const AFTER_MAP_TYPE_RESERVED: u64 = 4;

/// Field between the editor flag and the checkpoint count.
const AFTER_EDITOR_RESERVED: u64 = 4;

/// Total size of the layout above.
pub const BASE_CHUNK_SIZE: u32 = 57;

pub(crate) fn decode<R: Read + Seek>(ctx: &mut DecodeContext<R>) -> Result<()> {
    ctx.skip(LEADING_RESERVED)?;

    ctx.map.bronze_time = ctx.read_u32()?;
    ctx.map.silver_time = ctx.read_u32()?;
    ctx.map.gold_time = ctx.read_u32()?;
    ctx.map.author_time = ctx.read_u32()?;

    ctx.map.price = ctx.read_u32()?;
    ctx.map.is_multilap = ctx.read_flag()?;
    ctx.map.map_type_id = ctx.read_u32()?;

    ctx.skip(AFTER_MAP_TYPE_RESERVED)?;

    ctx.map.author_score = ctx.read_u32()?;
    ctx.map.editor = Some(EditorKind::from_flag(ctx.read_u32()?));

    ctx.skip(AFTER_EDITOR_RESERVED)?;

    ctx.map.checkpoints = ctx.read_u32()?;
    ctx.map.laps = ctx.read_u32()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::GbxReader;
    use std::io::Cursor;

    fn base_chunk(multilap: u32, editor: u32) -> Vec<u8> {
        let mut data = vec![0x0D, 0x00, 0x00, 0x00, 0x00];
        for value in [
            45_000u32, 38_000, 33_000, 31_337, // medal times
            1_234, multilap, 0, // price, multilap, map type id
            0xDEAD_BEEF, // reserved
            31_337, editor, // author score, editor
            0xDEAD_BEEF, // reserved
            7, 3, // checkpoints, laps
        ] {
            data.extend_from_slice(&value.to_le_bytes());
        }
        data
    }

    fn decode_bytes(data: Vec<u8>) -> Result<(crate::map::MapInfo, u64)> {
        let mut ctx = DecodeContext::new(GbxReader::new(Cursor::new(data)).unwrap());
        decode(&mut ctx)?;
        let consumed = ctx.reader_mut().position();
        Ok((ctx.into_map(), consumed))
    }

    #[test]
    fn test_decode_base() {
        let data = base_chunk(1, 0);
        assert_eq!(data.len(), BASE_CHUNK_SIZE as usize);

        let (map, consumed) = decode_bytes(data).unwrap();
        assert_eq!(consumed, u64::from(BASE_CHUNK_SIZE));
        assert_eq!(map.medal_times(), (45_000, 38_000, 33_000, 31_337));
        assert_eq!(map.price, 1_234);
        assert!(map.is_multilap);
        assert_eq!(map.map_type_id, 0);
        assert_eq!(map.author_score, 31_337);
        assert_eq!(map.editor, Some(EditorKind::Advanced));
        assert_eq!(map.checkpoints, 7);
        assert_eq!(map.laps, 3);
    }

    #[test]
    fn test_decode_base_simple_editor() {
        let (map, _) = decode_bytes(base_chunk(0, 1)).unwrap();
        assert!(!map.is_multilap);
        assert_eq!(map.editor, Some(EditorKind::Simple));
    }

    #[test]
    fn test_multilap_flag_must_be_one() {
        let (map, _) = decode_bytes(base_chunk(2, 0)).unwrap();
        assert!(!map.is_multilap);
    }

    #[test]
    fn test_decode_base_truncated() {
        let mut data = base_chunk(1, 0);
        data.truncate(50);
        assert!(decode_bytes(data).unwrap_err().is_truncated());
    }
}
