//! Lookback string behaviour observed through whole-map decoding.
//!
//! The summary chunk is the only header chunk that stores lookback strings,
//! so each test varies the lookback encodings inside an otherwise fixed
//! summary layout.

mod common;

use common::{map_file, Body, SUMMARY, XML, xml_body};
use gbx_map_parser::{read_bytes, ParserError};

/// Summary chunk with the three leading lookback fields supplied by the
/// caller and every later lookback field set to "empty".
fn summary_with(uid: Body, environment: Body, login: Body) -> Vec<u8> {
    let mut body = Body::new().raw(&[0x0B]).u32(3);
    body.0.extend(uid.0);
    body.0.extend(environment.0);
    body.0.extend(login.0);
    body.string("Name")
        .zeros(5)
        .string("")
        .u32(0)
        .u32(0)
        .u32(0)
        .zeros(32)
        .string("")
        .string("")
        .zeros(9)
        .u32(0)
        .0
}

#[test]
fn test_empty_and_no_value() {
    let data = map_file(&[(
        SUMMARY,
        summary_with(
            Body::new().u32(0),
            Body::new().u32(0xFFFF_FFFF),
            Body::new().new_lookback("login"),
        ),
    )]);
    let map = read_bytes(&data).unwrap();

    assert_eq!(map.uid, "");
    assert_eq!(map.environment, "");
    assert_eq!(map.author_login, "login");
}

#[test]
fn test_first_occurrence_then_back_reference() {
    let data = map_file(&[(
        SUMMARY,
        summary_with(
            Body::new().new_lookback("Storm"),
            Body::new().u32(0x4000_0001),
            Body::new().u32(0x8000_0001),
        ),
    )]);
    let map = read_bytes(&data).unwrap();

    assert_eq!(map.uid, "Storm");
    assert_eq!(map.environment, "Storm");
    assert_eq!(map.author_login, "Storm");
}

#[test]
fn test_predefined_ids() {
    let data = map_file(&[(
        SUMMARY,
        summary_with(Body::new().u32(11), Body::new().u32(10003), Body::new().u32(299)),
    )]);
    let map = read_bytes(&data).unwrap();

    assert_eq!(map.uid, "Valley");
    assert_eq!(map.environment, "Common");
    assert_eq!(map.author_login, "SMCommon");
}

#[test]
fn test_predefined_does_not_occupy_a_slot() {
    // Predefined names are never stored, so slot 1 is the first new string
    let data = map_file(&[(
        SUMMARY,
        summary_with(
            Body::new().u32(202),
            Body::new().new_lookback("first"),
            Body::new().u32(0x4000_0001),
        ),
    )]);
    let map = read_bytes(&data).unwrap();

    assert_eq!(map.uid, "Storm");
    assert_eq!(map.author_login, "first");
}

#[test]
fn test_back_reference_past_store() {
    let data = map_file(&[(
        SUMMARY,
        summary_with(
            Body::new().new_lookback("one"),
            Body::new().u32(0x4000_0002),
            Body::new().u32(0),
        ),
    )]);

    assert!(matches!(
        read_bytes(&data),
        Err(ParserError::LookbackIndexOutOfRange { index: 2, len: 1 })
    ));
}

#[test]
fn test_unknown_predefined() {
    let data = map_file(&[(
        SUMMARY,
        summary_with(Body::new().u32(5), Body::new().u32(0), Body::new().u32(0)),
    )]);

    assert!(matches!(
        read_bytes(&data),
        Err(ParserError::UnknownPredefinedLookback { index: 5 })
    ));
}

#[test]
fn test_version_read_per_chunk() {
    // A chunk before the summary does not consume the summary's version
    let data = map_file(&[
        (XML, xml_body("<before/>")),
        (
            SUMMARY,
            summary_with(
                Body::new().new_lookback("uid"),
                Body::new().u32(13),
                Body::new().u32(0),
            ),
        ),
    ]);
    let map = read_bytes(&data).unwrap();

    assert_eq!(map.header_xml, "<before/>");
    assert_eq!(map.uid, "uid");
    assert_eq!(map.environment, "Lagoon");
}
