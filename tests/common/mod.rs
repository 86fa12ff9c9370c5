//! Helpers for assembling synthetic map files byte by byte.

#![allow(dead_code)]

use gbx_map_parser::MAP_CLASS_ID;

pub const BASE: u32 = 0x0304_3002;
pub const SUMMARY: u32 = 0x0304_3003;
pub const UNKNOWN: u32 = 0x0304_3004;
pub const XML: u32 = 0x0304_3005;
pub const THUMBNAIL: u32 = 0x0304_3007;
pub const AUTHOR: u32 = 0x0304_3008;

/// Little-endian byte buffer for one chunk body.
#[derive(Default)]
pub struct Body(pub Vec<u8>);

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u32(mut self, value: u32) -> Self {
        self.0.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn zeros(self, len: usize) -> Self {
        self.raw(&vec![0u8; len])
    }

    pub fn string(self, value: &str) -> Self {
        self.u32(value.len() as u32).raw(value.as_bytes())
    }

    /// A first-occurrence lookback string.
    pub fn new_lookback(self, value: &str) -> Self {
        self.u32(0x4000_0000).string(value)
    }
}

/// Builds a whole map file: preamble, class id, chunk table, bodies.
pub fn map_file(chunks: &[(u32, Vec<u8>)]) -> Vec<u8> {
    map_file_with_flags(chunks, &[])
}

/// Like [`map_file`], setting the heavy bit on the listed chunk ids.
pub fn map_file_with_flags(chunks: &[(u32, Vec<u8>)], heavy: &[u32]) -> Vec<u8> {
    let mut data = b"GBX".to_vec();
    data.extend_from_slice(&6u16.to_le_bytes());
    data.extend_from_slice(b"BUCR");
    data.extend_from_slice(&MAP_CLASS_ID.to_le_bytes());

    let body_len: usize = chunks.iter().map(|(_, body)| body.len()).sum();
    let header_len = 4 + chunks.len() * 8 + body_len;
    data.extend_from_slice(&(header_len as u32).to_le_bytes());
    data.extend_from_slice(&(chunks.len() as u32).to_le_bytes());

    for (id, body) in chunks {
        let mut size = body.len() as u32;
        if heavy.contains(id) {
            size |= 0x8000_0000;
        }
        data.extend_from_slice(&id.to_le_bytes());
        data.extend_from_slice(&size.to_le_bytes());
    }
    for (_, body) in chunks {
        data.extend_from_slice(body);
    }

    // Stand-in for the compressed body that follows the header
    data.extend_from_slice(&[0x5A; 16]);
    data
}

pub fn base_body() -> Vec<u8> {
    Body::new()
        .raw(&[0x0D, 0x00, 0x00, 0x00, 0x00])
        .u32(60_000) // bronze
        .u32(48_000) // silver
        .u32(42_000) // gold
        .u32(39_874) // author
        .u32(2_150) // price
        .u32(0) // multilap
        .u32(0) // map type id
        .zeros(4)
        .u32(39_874) // author score
        .u32(0) // editor: advanced
        .zeros(4)
        .u32(12) // checkpoints
        .u32(1) // laps
        .0
}

pub fn summary_body(uid: &str, name: &str) -> Vec<u8> {
    Body::new()
        .raw(&[0x0B])
        .u32(3) // lookback version
        .new_lookback(uid)
        .u32(12) // Canyon
        .new_lookback("hylis")
        .string(name)
        .zeros(5)
        .string("")
        .new_lookback("Day")
        .u32(12) // Canyon
        .u32(0x4000_0002) // "hylis"
        .zeros(32)
        .string("ShootMania\\TMRace")
        .string("")
        .zeros(9)
        .new_lookback("TMCanyon")
        .0
}

pub fn author_body(login: &str, nick: &str, zone: &str) -> Vec<u8> {
    Body::new()
        .u32(1)
        .u32(0)
        .string(login)
        .string(nick)
        .string(zone)
        .string("")
        .0
}

pub fn thumbnail_body(jpeg: &[u8], comments: &str) -> Vec<u8> {
    Body::new()
        .u32(1)
        .u32(jpeg.len() as u32)
        .raw(b"<Thumbnail.jpg>")
        .raw(jpeg)
        .raw(b"</Thumbnail.jpg><Comments>")
        .string(comments)
        .raw(b"</Comments>")
        .0
}

pub fn xml_body(xml: &str) -> Vec<u8> {
    Body::new().string(xml).0
}
