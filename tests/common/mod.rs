//! Shared test utilities and fixtures.

#![allow(dead_code)]

use proptest::prelude::*;
use roaring::RoaringBitmap;
use skipset::{encode_ids, encode_ids_with_runs, SkipSet};

// ============================================================================
// FIXTURES
// ============================================================================

/// The canonical three-member set: two chunks, one of them holding the
/// chunk's last id.
pub const SAMPLE_IDS: [u32; 3] = [5, 70000, 131071];

/// Plain (cookie 12346) encoding of `ids`.
pub fn encode(ids: &[u32]) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_ids(ids.iter().copied(), &mut buf);
    buf
}

/// Run-optimized encoding of `ids`.
pub fn encode_runs(ids: &[u32]) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_ids_with_runs(ids.iter().copied(), &mut buf);
    buf
}

/// Decode a plain encoding of `ids`.
pub fn set_of(ids: &[u32]) -> SkipSet {
    SkipSet::from_bytes(&encode(ids)).expect("encoder output must decode")
}

/// Serialize `ids` with the `roaring` crate, an independent producer.
pub fn roaring_bytes(ids: &[u32]) -> Vec<u8> {
    let mut bitmap = RoaringBitmap::new();
    for &id in ids {
        bitmap.insert(id);
    }
    let mut buf = Vec::with_capacity(bitmap.serialized_size());
    bitmap
        .serialize_into(&mut buf)
        .expect("writing to a Vec cannot fail");
    buf
}

/// Sorted, deduplicated copy.
pub fn canonical(ids: &[u32]) -> Vec<u32> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// `count` consecutive ids starting at `start`.
pub fn dense_ids(start: u32, count: u32) -> Vec<u32> {
    (start..start + count).collect()
}

// ============================================================================
// HAND-BUILT WIRE BYTES
// ============================================================================

/// Builder for deliberately broken cookie-12346 inputs.
#[derive(Default)]
pub struct WireBuilder {
    buf: Vec<u8>,
}

impl WireBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u16(mut self, v: u16) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u16s(mut self, values: &[u16]) -> Self {
        for v in values {
            self.buf.extend_from_slice(&v.to_le_bytes());
        }
        self
    }

    pub fn u64s(mut self, words: &[u64]) -> Self {
        for w in words {
            self.buf.extend_from_slice(&w.to_le_bytes());
        }
        self
    }

    pub fn bytes(mut self, raw: &[u8]) -> Self {
        self.buf.extend_from_slice(raw);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Ids spread over the whole 32-bit universe.
pub fn sparse_ids() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(any::<u32>(), 0..300)
}

/// Ids crowded into a handful of chunks, so arrays, bitmaps and runs all
/// show up.
pub fn clustered_ids() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec((0u32..4, 0u32..65536, 1u32..3000), 0..6).prop_map(|clusters| {
        let mut ids = Vec::new();
        for (chunk, start, len) in clusters {
            let base = chunk << 16;
            let end = (start + len).min(65536);
            ids.extend((start..end).map(|low| base | low));
        }
        ids
    })
}

/// Either shape.
pub fn any_ids() -> impl Strategy<Value = Vec<u32>> {
    prop_oneof![sparse_ids(), clustered_ids()]
}
