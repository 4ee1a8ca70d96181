//! Integration tests for the FG2019 compress/decompress pipeline.
//!
//! These exercise the public `compress`/`decompress` entry points
//! end-to-end, covering the concrete scenarios and universal properties
//! enumerated for this codec.

use fg2019_core::error::FgError;
use std::io::Cursor;

fn roundtrip(data: &[u8]) -> Vec<u8> {
    let mut compressed = Vec::new();
    fg2019_codec::compress(Cursor::new(data.to_vec()), &mut compressed).expect("compress failed");

    let mut decompressed = Vec::new();
    fg2019_codec::decompress(Cursor::new(compressed), &mut decompressed).expect("decompress failed");
    decompressed
}

// ============================================================================
// Concrete end-to-end scenarios
// ============================================================================

#[test]
fn test_empty_input_is_rejected() {
    let mut compressed = Vec::new();
    let err = fg2019_codec::compress(Cursor::new(Vec::new()), &mut compressed).unwrap_err();
    assert!(matches!(err, FgError::EmptyInput));
}

#[test]
fn test_single_byte_roundtrips_and_carries_magic() {
    let mut compressed = Vec::new();
    fg2019_codec::compress(Cursor::new(b"A".to_vec()), &mut compressed).unwrap();
    assert_eq!(&compressed[..6], &fg2019_codec::MAGIC[..]);

    let mut decompressed = Vec::new();
    fg2019_codec::decompress(Cursor::new(compressed), &mut decompressed).unwrap();
    assert_eq!(decompressed, b"A");
}

#[test]
fn test_repeated_byte_roundtrips() {
    let data = vec![b'x'; 4096];
    assert_eq!(roundtrip(&data), data);
}

#[test]
fn test_alternating_bytes_roundtrip_with_length_table() {
    let data: Vec<u8> = (0..2000).map(|i| if i % 2 == 0 { b'A' } else { b'B' }).collect();

    let mut compressed = Vec::new();
    fg2019_codec::compress(Cursor::new(data.clone()), &mut compressed).unwrap();

    // Header: 6-byte magic + 8-byte size + 257-byte length table.
    let lengths = &compressed[14..14 + 257];
    assert_eq!(lengths[b'A' as usize], 1);
    assert_eq!(lengths[b'B' as usize], 1);
    assert!(lengths.iter().enumerate().all(|(sym, &len)| {
        sym == b'A' as usize || sym == b'B' as usize || sym == 256 || len == 0
    }));

    let mut decompressed = Vec::new();
    fg2019_codec::decompress(Cursor::new(compressed), &mut decompressed).unwrap();
    assert_eq!(decompressed, data);
}

#[test]
fn test_all_256_byte_values_roundtrip() {
    let data: Vec<u8> = (0..=255u8).collect();
    assert_eq!(roundtrip(&data), data);
}

#[test]
fn test_tampered_magic_is_rejected() {
    let mut compressed = Vec::new();
    fg2019_codec::compress(Cursor::new(b"hello".to_vec()), &mut compressed).unwrap();
    compressed[0] = b'X';

    let mut decompressed = Vec::new();
    let err = fg2019_codec::decompress(Cursor::new(compressed), &mut decompressed).unwrap_err();
    assert!(matches!(err, FgError::MagicMissing { .. }));
}

// ============================================================================
// Universal properties
// ============================================================================

#[test]
fn test_roundtrip_holds_for_varied_inputs() {
    let samples: Vec<Vec<u8>> = vec![
        b"a".to_vec(),
        b"the quick brown fox jumps over the lazy dog".to_vec(),
        vec![0u8; 1],
        vec![0u8, 1, 2, 3, 4, 5, 255, 254, 253],
        (0..10_000u32).map(|i| (i % 251) as u8).collect(),
    ];

    for sample in samples {
        assert_eq!(roundtrip(&sample), sample);
    }
}

#[test]
fn test_truncated_container_is_rejected() {
    let mut compressed = Vec::new();
    fg2019_codec::compress(Cursor::new(b"truncate me".to_vec()), &mut compressed).unwrap();
    compressed.truncate(compressed.len() - 1);

    let mut decompressed = Vec::new();
    let err = fg2019_codec::decompress(Cursor::new(compressed), &mut decompressed).unwrap_err();
    assert!(matches!(
        err,
        FgError::TruncatedPayload { .. } | FgError::MalformedHeader { .. }
    ));
}
