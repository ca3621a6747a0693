// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Portable-format header: cookie, chunk count, descriptors, offsets.
//!
//! Everything before the first container payload. The header is read in one
//! pass and fully validated before any payload is touched: we know every key,
//! every declared cardinality and where every payload should start, which is
//! enough to reject a lying chunk count before allocating anything for it.
//!
//! Two cookies exist. 12346 means "no run containers" and is followed by an
//! explicit `u32` chunk count. 12347 in the low half means "run containers may
//! appear", packs `count - 1` into the high half, and is followed by a bitset
//! saying which chunks are runs. The offset header is always present for
//! 12346 and only present for 12347 when there are at least four chunks.

use super::encoding::ByteReader;
use crate::container::{ContainerKind, BITMAP_BYTES};
use crate::error::MalformedInputError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Cookie for output without run containers.
pub const SERIAL_COOKIE_NO_RUNCONTAINER: u32 = 12346;

/// Cookie (low 16 bits) for output that may contain run containers.
pub const SERIAL_COOKIE: u32 = 12347;

/// With runs, the offset header is omitted below this many chunks.
pub const NO_OFFSET_THRESHOLD: usize = 4;

/// One chunk per 16-bit key, at most.
pub const MAX_CHUNKS: usize = 1 << 16;

/// Smallest valid run payload: a run count plus one run.
pub const MIN_RUN_PAYLOAD: usize = 2 + 4;

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// How a chunk's payload is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Array,
    Bitmap,
    Run,
}

impl PayloadKind {
    /// Run flag first, then the cardinality convention.
    fn classify(is_run: bool, cardinality: u32) -> Self {
        if is_run {
            return PayloadKind::Run;
        }
        match ContainerKind::for_cardinality(cardinality as usize) {
            ContainerKind::Array => PayloadKind::Array,
            ContainerKind::Bitmap => PayloadKind::Bitmap,
        }
    }

    /// Smallest byte count a well-formed payload of this kind can occupy.
    pub fn min_payload_len(self, cardinality: u32) -> usize {
        match self {
            PayloadKind::Array => cardinality as usize * 2,
            PayloadKind::Bitmap => BITMAP_BYTES,
            PayloadKind::Run => MIN_RUN_PAYLOAD,
        }
    }
}

/// One entry of the descriptive header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDescriptor {
    pub key: u16,
    /// Declared member count, 1..=65536.
    pub cardinality: u32,
    pub payload: PayloadKind,
}

// ============================================================================
// HEADER
// ============================================================================

/// Everything that precedes the container payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatHeader {
    pub has_runs: bool,
    pub chunks: Vec<ChunkDescriptor>,
    /// Absolute payload offsets, when the format carries them.
    pub offsets: Option<Vec<u32>>,
}

impl FormatHeader {
    /// Read and validate the header, leaving `reader` at the first payload.
    ///
    /// Fails when the cookie is unknown, the chunk count is out of range, keys
    /// are not strictly ascending, or the remaining bytes cannot possibly hold
    /// the payloads the descriptors declare.
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, MalformedInputError> {
        let cookie = reader.read_u32()?;

        let (has_runs, count) = if cookie == SERIAL_COOKIE_NO_RUNCONTAINER {
            (false, u64::from(reader.read_u32()?))
        } else if cookie & 0xFFFF == SERIAL_COOKIE {
            (true, u64::from(cookie >> 16) + 1)
        } else {
            return Err(MalformedInputError::InvalidCookie(cookie));
        };

        if count > MAX_CHUNKS as u64 {
            return Err(MalformedInputError::TooManyChunks(count));
        }
        let count = count as usize;
        let has_offsets = !has_runs || count >= NO_OFFSET_THRESHOLD;

        // Security: the fixed part of the header must fit before we size
        // any allocation from `count`
        let run_flags_len = if has_runs { count.div_ceil(8) } else { 0 };
        let offsets_len = if has_offsets { count * 4 } else { 0 };
        reader.ensure(run_flags_len + count * 4 + offsets_len)?;

        let run_flags = reader.take(run_flags_len)?;

        let mut chunks = Vec::with_capacity(count);
        let mut previous: Option<u16> = None;
        for index in 0..count {
            let key = reader.read_u16()?;
            let cardinality = u32::from(reader.read_u16()?) + 1;

            if let Some(previous) = previous {
                if key <= previous {
                    return Err(MalformedInputError::UnorderedKeys {
                        index,
                        previous,
                        key,
                    });
                }
            }
            previous = Some(key);

            let is_run = has_runs && run_flags[index / 8] & (1 << (index % 8)) != 0;
            chunks.push(ChunkDescriptor {
                key,
                cardinality,
                payload: PayloadKind::classify(is_run, cardinality),
            });
        }

        let offsets = if has_offsets {
            let mut offsets = Vec::with_capacity(count);
            for _ in 0..count {
                offsets.push(reader.read_u32()?);
            }
            Some(offsets)
        } else {
            None
        };

        // The declared chunks must fit in what is left
        let min_payload: usize = chunks
            .iter()
            .map(|c| c.payload.min_payload_len(c.cardinality))
            .sum();
        reader.ensure(min_payload)?;

        Ok(Self {
            has_runs,
            chunks,
            offsets,
        })
    }

    /// Serialized size of a header for `count` chunks.
    pub fn encoded_len(has_runs: bool, count: usize) -> usize {
        if has_runs {
            let offsets = if count >= NO_OFFSET_THRESHOLD { 4 * count } else { 0 };
            4 + count.div_ceil(8) + 4 * count + offsets
        } else {
            4 + 4 + 8 * count
        }
    }

    /// Write a header. `payload_lens` gives the byte size of each payload in
    /// chunk order. Offsets are computed from it; `self.offsets` only says
    /// whether an offset header is written at all.
    pub fn write(&self, payload_lens: &[usize], buf: &mut Vec<u8>) {
        let count = self.chunks.len();
        debug_assert_eq!(count, payload_lens.len());

        if self.has_runs {
            debug_assert!(count > 0, "a run-format header needs at least one chunk");
            let cookie = SERIAL_COOKIE | ((count as u32 - 1) << 16);
            buf.extend_from_slice(&cookie.to_le_bytes());

            let mut run_flags = vec![0u8; count.div_ceil(8)];
            for (i, chunk) in self.chunks.iter().enumerate() {
                if chunk.payload == PayloadKind::Run {
                    run_flags[i / 8] |= 1 << (i % 8);
                }
            }
            buf.extend_from_slice(&run_flags);
        } else {
            buf.extend_from_slice(&SERIAL_COOKIE_NO_RUNCONTAINER.to_le_bytes());
            buf.extend_from_slice(&(count as u32).to_le_bytes());
        }

        for chunk in &self.chunks {
            buf.extend_from_slice(&chunk.key.to_le_bytes());
            buf.extend_from_slice(&((chunk.cardinality - 1) as u16).to_le_bytes());
        }

        if self.offsets.is_some() {
            let mut offset = Self::encoded_len(self.has_runs, count);
            for len in payload_lens {
                buf.extend_from_slice(&(offset as u32).to_le_bytes());
                offset += len;
            }
        }
    }
}
