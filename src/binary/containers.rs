// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Container payload decoding and encoding.
//!
//! Three payload shapes on the wire, two in memory. Arrays and bitmaps are
//! read straight into their in-memory form: arrays are checked for strict
//! ordering as they're parsed, bitmaps are copied word by word and their
//! population count is compared with the declared cardinality. Runs are
//! validated (in range, ordered, non-overlapping, lengths summing to the
//! declared cardinality) and then expanded into an array or bitmap.
//!
//! Run payload layout:
//!
//! ```text
//! n_runs: u16
//! n_runs x (start: u16, length - 1: u16)
//! ```

use super::encoding::{write_u16s, write_u64s, ByteReader};
use super::header::{ChunkDescriptor, PayloadKind};
use crate::container::{set_range, Container, ContainerKind, BITMAP_BYTES, BITMAP_WORDS};
use crate::error::MalformedInputError;

// ============================================================================
// DECODING
// ============================================================================

/// Decode the payload for `chunk` at the reader's position.
pub fn decode_payload(
    reader: &mut ByteReader<'_>,
    chunk: &ChunkDescriptor,
) -> Result<Container, MalformedInputError> {
    match chunk.payload {
        PayloadKind::Array => decode_array(reader, chunk),
        PayloadKind::Bitmap => decode_bitmap(reader, chunk),
        PayloadKind::Run => decode_runs(reader, chunk),
    }
}

fn decode_array(
    reader: &mut ByteReader<'_>,
    chunk: &ChunkDescriptor,
) -> Result<Container, MalformedInputError> {
    let count = chunk.cardinality as usize;
    let bytes = reader.take(count * 2)?;

    let mut values = Vec::with_capacity(count);
    for (position, pair) in bytes.chunks_exact(2).enumerate() {
        let value = u16::from_le_bytes([pair[0], pair[1]]);
        if values.last().is_some_and(|&last| value <= last) {
            return Err(MalformedInputError::UnsortedArray {
                key: chunk.key,
                position,
            });
        }
        values.push(value);
    }

    Ok(Container::array(values))
}

fn decode_bitmap(
    reader: &mut ByteReader<'_>,
    chunk: &ChunkDescriptor,
) -> Result<Container, MalformedInputError> {
    let bytes = reader.take(BITMAP_BYTES)?;

    let words: Vec<u64> = bytes
        .chunks_exact(8)
        .map(|b| u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
        .collect();

    let actual: u32 = words.iter().map(|w| w.count_ones()).sum();
    if actual != chunk.cardinality {
        return Err(MalformedInputError::CardinalityMismatch {
            key: chunk.key,
            declared: chunk.cardinality,
            actual,
        });
    }

    Ok(Container::bitmap(words))
}

fn decode_runs(
    reader: &mut ByteReader<'_>,
    chunk: &ChunkDescriptor,
) -> Result<Container, MalformedInputError> {
    let n_runs = reader.read_u16()? as usize;
    if n_runs == 0 {
        return Err(MalformedInputError::InvalidRun {
            key: chunk.key,
            run: 0,
        });
    }
    let bytes = reader.take(n_runs * 4)?;

    let mut runs = Vec::with_capacity(n_runs);
    let mut total: u32 = 0;
    let mut previous_end: Option<u32> = None;

    for (run, quad) in bytes.chunks_exact(4).enumerate() {
        let start = u32::from(u16::from_le_bytes([quad[0], quad[1]]));
        let length = u32::from(u16::from_le_bytes([quad[2], quad[3]]));
        let end = start + length;

        let overlaps = previous_end.is_some_and(|prev| start <= prev);
        if end > u32::from(u16::MAX) || overlaps {
            return Err(MalformedInputError::InvalidRun {
                key: chunk.key,
                run,
            });
        }

        previous_end = Some(end);
        total += length + 1;
        runs.push((start as u16, end as u16));
    }

    if total != chunk.cardinality {
        return Err(MalformedInputError::CardinalityMismatch {
            key: chunk.key,
            declared: chunk.cardinality,
            actual: total,
        });
    }

    Ok(Container::from_runs(&runs, total as usize))
}

// ============================================================================
// ENCODING
// ============================================================================

/// Payload of one chunk, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedPayload {
    Array(Vec<u16>),
    Bitmap(Vec<u64>),
    /// `(start, end_inclusive)` pairs.
    Runs(Vec<(u16, u16)>),
}

impl EncodedPayload {
    /// Array or bitmap for ascending, deduplicated `values`, by cardinality.
    pub fn plain(values: &[u16]) -> Self {
        match ContainerKind::for_cardinality(values.len()) {
            ContainerKind::Array => EncodedPayload::Array(values.to_vec()),
            ContainerKind::Bitmap => {
                let mut words = vec![0u64; BITMAP_WORDS];
                for &v in values {
                    set_range(&mut words, v, v);
                }
                EncodedPayload::Bitmap(words)
            }
        }
    }

    /// The smallest of array, bitmap and runs. Runs win only when strictly
    /// smaller.
    pub fn smallest(values: &[u16]) -> Self {
        let runs = collect_runs(values);
        let plain = Self::plain(values);
        if 2 + 4 * runs.len() < plain.encoded_len() {
            EncodedPayload::Runs(runs)
        } else {
            plain
        }
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            EncodedPayload::Array(_) => PayloadKind::Array,
            EncodedPayload::Bitmap(_) => PayloadKind::Bitmap,
            EncodedPayload::Runs(_) => PayloadKind::Run,
        }
    }

    pub fn encoded_len(&self) -> usize {
        match self {
            EncodedPayload::Array(values) => values.len() * 2,
            EncodedPayload::Bitmap(_) => BITMAP_BYTES,
            EncodedPayload::Runs(runs) => 2 + runs.len() * 4,
        }
    }

    pub fn write(&self, buf: &mut Vec<u8>) {
        match self {
            EncodedPayload::Array(values) => write_u16s(values, buf),
            EncodedPayload::Bitmap(words) => write_u64s(words, buf),
            EncodedPayload::Runs(runs) => {
                buf.extend_from_slice(&(runs.len() as u16).to_le_bytes());
                for &(start, end) in runs {
                    buf.extend_from_slice(&start.to_le_bytes());
                    buf.extend_from_slice(&(end - start).to_le_bytes());
                }
            }
        }
    }
}

/// Maximal runs of consecutive values in an ascending slice.
fn collect_runs(values: &[u16]) -> Vec<(u16, u16)> {
    let mut runs: Vec<(u16, u16)> = Vec::new();
    for &v in values {
        match runs.last_mut() {
            Some((_, end)) if u32::from(*end) + 1 == u32::from(v) => *end = v,
            _ => runs.push((v, v)),
        }
    }
    runs
}
