// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The portable Roaring wire format, as consumed by skip sets.
//!
//! Skip sets are built by some other system and shipped to us as bytes,
//! usually base64 inside a request parameter. The format is the portable
//! Roaring serialization, so any producer that speaks it (Java, C, Go, Rust)
//! can hand us a set. We only ever read it in production; the writer here
//! exists for tools, tests, fuzz seeds and benchmarks.
//!
//! # Security Considerations
//!
//! The bytes come from outside and are parsed once per query:
//! - Every read is bounds-checked through `ByteReader`
//! - The chunk count is checked against the remaining length before any
//!   per-chunk allocation
//! - Keys must be strictly ascending, arrays strictly ascending, bitmap
//!   popcounts and run lengths must match the declared cardinality
//! - Offsets, when present, must point at the actual payloads
//! - Trailing bytes are rejected
//!
//! # Format Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ cookie: u32                                                  │
//! │   12346            -> count: u32 follows, no run containers  │
//! │   12347 | (n-1)<<16 -> run bitset [(n+7)/8 bytes] follows    │
//! ├──────────────────────────────────────────────────────────────┤
//! │ descriptive header: n x (key: u16, cardinality-1: u16)       │
//! ├──────────────────────────────────────────────────────────────┤
//! │ offset header: n x u32  (12346 always; 12347 when n >= 4)    │
//! ├──────────────────────────────────────────────────────────────┤
//! │ payloads, key order:                                         │
//! │   run flag          -> n_runs: u16, n_runs x (start, len-1)  │
//! │   cardinality<=4096 -> cardinality x u16, ascending          │
//! │   cardinality >4096 -> 1024 x u64 bitmap words               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers little-endian.

mod containers;
mod encoding;
mod header;

pub use containers::{decode_payload, EncodedPayload};
pub use encoding::{write_u16s, write_u64s, ByteReader};
pub use header::{
    ChunkDescriptor, FormatHeader, PayloadKind, MAX_CHUNKS, MIN_RUN_PAYLOAD, NO_OFFSET_THRESHOLD,
    SERIAL_COOKIE, SERIAL_COOKIE_NO_RUNCONTAINER,
};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::debug;

use crate::chunk_index::ChunkIndex;
use crate::error::MalformedInputError;

// ============================================================================
// DESERIALIZATION
// ============================================================================

/// Parse portable-format bytes into a `ChunkIndex`.
///
/// Single forward pass, no backtracking. The input is only borrowed; the
/// only allocations are the key list and the final container payloads.
///
/// Fails with `MalformedInputError` on any structural problem. An empty set
/// (cookie 12346, zero chunks) is valid and yields an empty index.
pub fn deserialize(bytes: &[u8]) -> Result<ChunkIndex, MalformedInputError> {
    let mut reader = ByteReader::new(bytes);
    let header = FormatHeader::read(&mut reader)?;

    let mut keys = Vec::with_capacity(header.chunks.len());
    let mut containers = Vec::with_capacity(header.chunks.len());

    for (index, chunk) in header.chunks.iter().enumerate() {
        if let Some(offsets) = &header.offsets {
            let declared = offsets[index];
            if declared as usize != reader.position() {
                return Err(MalformedInputError::OffsetMismatch {
                    index,
                    declared,
                    actual: reader.position(),
                });
            }
        }

        containers.push(decode_payload(&mut reader, chunk)?);
        keys.push(chunk.key);
    }

    if reader.remaining() > 0 {
        return Err(MalformedInputError::TrailingBytes(reader.remaining()));
    }

    let index = ChunkIndex::from_parts(keys, containers);
    debug!(
        bytes = bytes.len(),
        chunks = index.chunk_count(),
        members = index.len(),
        runs = header.has_runs,
        "deserialized skip set"
    );
    Ok(index)
}

// ============================================================================
// SERIALIZATION
// ============================================================================

/// Write `ids` in the no-run (cookie 12346) layout.
///
/// Order and duplicates in `ids` don't matter.
pub fn encode_ids<I: IntoIterator<Item = u32>>(ids: I, buf: &mut Vec<u8>) {
    let chunks = group_chunks(ids)
        .into_iter()
        .map(|(key, values)| (key, EncodedPayload::plain(&values)))
        .collect();
    write_chunks(chunks, false, buf);
}

/// Write `ids` choosing, per chunk, the smallest of array, bitmap and run.
///
/// Uses the run (cookie 12347) layout when at least one chunk ends up as
/// runs, and falls back to the plain layout otherwise, the same way the
/// reference implementations do after run optimization.
pub fn encode_ids_with_runs<I: IntoIterator<Item = u32>>(ids: I, buf: &mut Vec<u8>) {
    let chunks: Vec<(u16, EncodedPayload)> = group_chunks(ids)
        .into_iter()
        .map(|(key, values)| (key, EncodedPayload::smallest(&values)))
        .collect();
    let has_runs = chunks.iter().any(|(_, p)| p.kind() == PayloadKind::Run);
    write_chunks(chunks, has_runs, buf);
}

/// Sort, deduplicate and split ids into `(high key, ascending low keys)`.
fn group_chunks<I: IntoIterator<Item = u32>>(ids: I) -> Vec<(u16, Vec<u16>)> {
    let mut ids: Vec<u32> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();

    let mut chunks: Vec<(u16, Vec<u16>)> = Vec::new();
    for id in ids {
        let (high, low) = ((id >> 16) as u16, id as u16);
        match chunks.last_mut() {
            Some((key, values)) if *key == high => values.push(low),
            _ => chunks.push((high, vec![low])),
        }
    }
    chunks
}

fn write_chunks(chunks: Vec<(u16, EncodedPayload)>, has_runs: bool, buf: &mut Vec<u8>) {
    let count = chunks.len();
    let header = FormatHeader {
        has_runs,
        chunks: chunks
            .iter()
            .map(|(key, payload)| ChunkDescriptor {
                key: *key,
                cardinality: match payload {
                    EncodedPayload::Array(values) => values.len() as u32,
                    EncodedPayload::Bitmap(words) => words.iter().map(|w| w.count_ones()).sum(),
                    EncodedPayload::Runs(runs) => runs
                        .iter()
                        .map(|&(s, e)| u32::from(e - s) + 1)
                        .sum(),
                },
                payload: payload.kind(),
            })
            .collect(),
        offsets: (!has_runs || count >= NO_OFFSET_THRESHOLD).then(Vec::new),
    };

    let payload_lens: Vec<usize> = chunks.iter().map(|(_, p)| p.encoded_len()).collect();
    buf.reserve(FormatHeader::encoded_len(has_runs, count) + payload_lens.iter().sum::<usize>());

    header.write(&payload_lens, buf);
    for (_, payload) in &chunks {
        payload.write(buf);
    }
}

// ============================================================================
// TRANSPORT
// ============================================================================

/// Decode the standard (padded) base64 used to carry skip sets in params.
///
/// Surrounding ASCII whitespace is ignored, so values pasted from a file with
/// a trailing newline still decode.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64.decode(text.trim_ascii())
}

/// Encode bytes as standard (padded) base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}
