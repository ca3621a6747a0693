//! Negative tests for wire format validation.
//!
//! The skip set arrives from outside on every query. These tests verify the
//! decoder rejects malformed, truncated or inconsistent input with a
//! `MalformedInputError`, and never panics or misreads it.
//!
//! ## Test Categories
//!
//! 1. **Framing**: empty input, unknown cookie, truncated header
//! 2. **Header**: chunk count, key order, declared sizes
//! 3. **Payloads**: unsorted arrays, bitmap popcount, runs
//! 4. **Layout**: offsets, trailing bytes

use skipset::{deserialize, MalformedInputError, SetupError, SkipSet};

use crate::common::{encode, WireBuilder, SAMPLE_IDS};

const NO_RUNS: u32 = 12346;
const RUNS: u32 = 12347;

// ============================================================================
// FRAMING
// ============================================================================

#[test]
fn test_empty_input_rejected() {
    assert!(matches!(
        deserialize(&[]),
        Err(MalformedInputError::Truncated { offset: 0, .. })
    ));
}

#[test]
fn test_unknown_cookie_rejected() {
    let bytes = WireBuilder::new().u32(0xDEAD_BEEF).u32(0).build();
    assert_eq!(
        deserialize(&bytes),
        Err(MalformedInputError::InvalidCookie(0xDEAD_BEEF))
    );
}

#[test]
fn test_cookie_alone_rejected() {
    let bytes = WireBuilder::new().u32(NO_RUNS).build();
    assert!(matches!(
        deserialize(&bytes),
        Err(MalformedInputError::Truncated { offset: 4, .. })
    ));
}

#[test]
fn test_every_prefix_of_sample_rejected() {
    let bytes = encode(&SAMPLE_IDS);
    for len in 0..bytes.len() {
        assert!(deserialize(&bytes[..len]).is_err(), "prefix {} accepted", len);
    }
    assert!(deserialize(&bytes).is_ok());
}

// ============================================================================
// HEADER
// ============================================================================

#[test]
fn test_chunk_count_beyond_key_space() {
    let bytes = WireBuilder::new().u32(NO_RUNS).u32(70_000).build();
    assert_eq!(
        deserialize(&bytes),
        Err(MalformedInputError::TooManyChunks(70_000))
    );
}

#[test]
fn test_lying_chunk_count_fails_fast() {
    // Claims 60000 chunks, supplies one
    let bytes = WireBuilder::new()
        .u32(NO_RUNS)
        .u32(60_000)
        .u16s(&[0, 0])
        .u32(16)
        .u16(5)
        .build();
    assert!(matches!(
        deserialize(&bytes),
        Err(MalformedInputError::Truncated { offset: 8, .. })
    ));
}

#[test]
fn test_duplicate_keys_rejected() {
    let bytes = WireBuilder::new()
        .u32(NO_RUNS)
        .u32(2)
        .u16s(&[1, 0, 1, 0])
        .u32(24)
        .u32(26)
        .u16s(&[5, 6])
        .build();
    assert_eq!(
        deserialize(&bytes),
        Err(MalformedInputError::UnorderedKeys {
            index: 1,
            previous: 1,
            key: 1
        })
    );
}

#[test]
fn test_descending_keys_rejected() {
    let bytes = WireBuilder::new()
        .u32(NO_RUNS)
        .u32(2)
        .u16s(&[3, 0, 2, 0])
        .u32(24)
        .u32(26)
        .u16s(&[5, 6])
        .build();
    assert_eq!(
        deserialize(&bytes),
        Err(MalformedInputError::UnorderedKeys {
            index: 1,
            previous: 3,
            key: 2
        })
    );
}

#[test]
fn test_declared_bitmap_missing() {
    // Cardinality 5000 promises an 8 KiB bitmap
    let bytes = WireBuilder::new()
        .u32(NO_RUNS)
        .u32(1)
        .u16s(&[0, 4999])
        .u32(16)
        .bytes(&[0u8; 100])
        .build();
    assert!(matches!(
        deserialize(&bytes),
        Err(MalformedInputError::Truncated { needed: 8192, .. })
    ));
}

// ============================================================================
// PAYLOADS
// ============================================================================

#[test]
fn test_unsorted_array_rejected() {
    let bytes = WireBuilder::new()
        .u32(NO_RUNS)
        .u32(1)
        .u16s(&[0, 2])
        .u32(16)
        .u16s(&[1, 9, 4])
        .build();
    assert_eq!(
        deserialize(&bytes),
        Err(MalformedInputError::UnsortedArray { key: 0, position: 2 })
    );
}

#[test]
fn test_bitmap_popcount_mismatch() {
    let mut words = vec![0u64; 1024];
    words[0] = u64::MAX;
    let bytes = WireBuilder::new()
        .u32(NO_RUNS)
        .u32(1)
        .u16s(&[0, 4999])
        .u32(16)
        .u64s(&words)
        .build();
    assert_eq!(
        deserialize(&bytes),
        Err(MalformedInputError::CardinalityMismatch {
            key: 0,
            declared: 5000,
            actual: 64
        })
    );
}

#[test]
fn test_run_past_chunk_end() {
    // One chunk flagged as run: start 65530, length-1 = 10
    let bytes = WireBuilder::new()
        .u32(RUNS)
        .bytes(&[0b1])
        .u16s(&[0, 10])
        .u16s(&[1, 65530, 10])
        .build();
    assert_eq!(
        deserialize(&bytes),
        Err(MalformedInputError::InvalidRun { key: 0, run: 0 })
    );
}

#[test]
fn test_run_cardinality_mismatch() {
    let bytes = WireBuilder::new()
        .u32(RUNS)
        .bytes(&[0b1])
        .u16s(&[0, 99])
        .u16s(&[1, 0, 9])
        .build();
    assert_eq!(
        deserialize(&bytes),
        Err(MalformedInputError::CardinalityMismatch {
            key: 0,
            declared: 100,
            actual: 10
        })
    );
}

#[test]
fn test_well_formed_run_accepted() {
    let bytes = WireBuilder::new()
        .u32(RUNS)
        .bytes(&[0b1])
        .u16s(&[2, 9])
        .u16s(&[1, 100, 9])
        .build();
    let set = SkipSet::from_bytes(&bytes).unwrap();
    assert_eq!(set.len(), 10);
    assert!(set.contains((2 << 16) | 100));
    assert!(set.contains((2 << 16) | 109));
    assert!(!set.contains((2 << 16) | 110));
}

// ============================================================================
// LAYOUT
// ============================================================================

#[test]
fn test_offset_pointing_elsewhere() {
    let bytes = WireBuilder::new()
        .u32(NO_RUNS)
        .u32(1)
        .u16s(&[0, 0])
        .u32(99)
        .u16(5)
        .build();
    assert_eq!(
        deserialize(&bytes),
        Err(MalformedInputError::OffsetMismatch {
            index: 0,
            declared: 99,
            actual: 16
        })
    );
}

#[test]
fn test_trailing_garbage() {
    let mut bytes = encode(&SAMPLE_IDS);
    bytes.extend_from_slice(b"xyz");
    assert_eq!(deserialize(&bytes), Err(MalformedInputError::TrailingBytes(3)));
}

#[test]
fn test_setup_wraps_malformed_input() {
    let err = SkipSet::from_base64("AAAA").unwrap_err();
    assert!(matches!(err, SetupError::Malformed(_)));
    assert!(err.to_string().starts_with("skip set deserialize failed"));
}
