// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Kani model checking proofs for skipset bit addressing.
//!
//! This standalone crate extracts the arithmetic that turns a 32-bit id into
//! a chunk key, a bitmap word and a bit, and proves it with Kani over every
//! possible input rather than a sample.
//!
//! Run with: `cargo kani`
//!
//! ## Verified Properties
//!
//! 1. **Key split**: `(high << 16) | low` rebuilds every id
//! 2. **Bitmap addressing**: word index and bit offset stay in bounds and
//!    name a distinct bit for every low key
//! 3. **Run bounds**: the run validity check rejects exactly the runs that
//!    leave the 16-bit range
//! 4. **Header size**: the encoded header length never overflows for any
//!    legal chunk count

/// Words in a bitmap container.
pub const BITMAP_WORDS: usize = 1024;

/// Most chunks a set can hold.
pub const MAX_CHUNKS: usize = 1 << 16;

/// Run-format sets omit offsets below this many chunks.
pub const NO_OFFSET_THRESHOLD: usize = 4;

// ============================================================================
// ADDRESSING (copied from src/membership.rs and src/container/bitmap.rs)
// ============================================================================

pub fn high_key(id: u32) -> u16 {
    (id >> 16) as u16
}

pub fn low_key(id: u32) -> u16 {
    (id & 0xFFFF) as u16
}

pub fn word_index(low: u16) -> usize {
    usize::from(low >> 6)
}

pub fn bit_offset(low: u16) -> u32 {
    u32::from(low & 63)
}

/// Bit test the way `BitmapContainer::contains` does it.
pub fn bit_is_set(words: &[u64], low: u16) -> bool {
    (words[word_index(low)] >> bit_offset(low)) & 1 == 1
}

// ============================================================================
// WIRE ARITHMETIC (copied from src/binary/containers.rs and header.rs)
// ============================================================================

/// A run `(start, length - 1)` is valid when it ends inside the chunk.
pub fn run_end(start: u16, length_minus_one: u16) -> Option<u16> {
    let end = u32::from(start) + u32::from(length_minus_one);
    if end > u32::from(u16::MAX) {
        None
    } else {
        Some(end as u16)
    }
}

/// Serialized header size for `count` chunks.
pub fn header_len(has_runs: bool, count: usize) -> usize {
    if has_runs {
        let offsets = if count >= NO_OFFSET_THRESHOLD { 4 * count } else { 0 };
        4 + count.div_ceil(8) + 4 * count + offsets
    } else {
        4 + 4 + 8 * count
    }
}

// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// The key split loses nothing.
    #[kani::proof]
    fn verify_key_split_roundtrip() {
        let id: u32 = kani::any();
        let rebuilt = (u32::from(high_key(id)) << 16) | u32::from(low_key(id));
        kani::assert(rebuilt == id, "high/low split must rebuild the id");
    }

    /// Ids in the same chunk share a high key; ids in different chunks don't.
    #[kani::proof]
    fn verify_high_key_partitions() {
        let a: u32 = kani::any();
        let b: u32 = kani::any();
        let same_chunk = a / 65536 == b / 65536;
        kani::assert(
            same_chunk == (high_key(a) == high_key(b)),
            "high key must identify the chunk",
        );
    }

    /// Every low key addresses a word inside the bitmap and a bit inside
    /// the word.
    #[kani::proof]
    fn verify_bitmap_addressing_in_bounds() {
        let low: u16 = kani::any();
        kani::assert(word_index(low) < BITMAP_WORDS, "word index in bounds");
        kani::assert(bit_offset(low) < 64, "bit offset in bounds");
    }

    /// Two different low keys never share a (word, bit) slot.
    #[kani::proof]
    fn verify_bitmap_addressing_injective() {
        let a: u16 = kani::any();
        let b: u16 = kani::any();
        kani::assume(a != b);
        kani::assert(
            word_index(a) != word_index(b) || bit_offset(a) != bit_offset(b),
            "distinct low keys must map to distinct bits",
        );
    }

    /// Setting one bit makes exactly that low key a member.
    #[kani::proof]
    fn verify_single_bit_membership() {
        let set: u16 = kani::any();
        let probe: u16 = kani::any();
        let mut words = [0u64; BITMAP_WORDS];
        words[word_index(set)] |= 1u64 << bit_offset(set);
        kani::assert(
            bit_is_set(&words, probe) == (probe == set),
            "only the set bit is a member",
        );
    }

    /// Accepted runs stay in range; rejected runs really overflow.
    #[kani::proof]
    fn verify_run_end_bounds() {
        let start: u16 = kani::any();
        let len: u16 = kani::any();
        match run_end(start, len) {
            Some(end) => {
                kani::assert(end >= start, "run end not before start");
                kani::assert(
                    u32::from(end) - u32::from(start) == u32::from(len),
                    "run covers len + 1 values",
                );
            }
            None => kani::assert(
                u32::from(start) + u32::from(len) > 65535,
                "only overflowing runs are rejected",
            ),
        }
    }

    /// Header sizes for legal chunk counts fit comfortably in usize and
    /// grow with the count.
    #[kani::proof]
    fn verify_header_len_monotone() {
        let count: usize = kani::any_where(|&n| n < MAX_CHUNKS);
        let runs: bool = kani::any();
        let here = header_len(runs, count);
        let next = header_len(runs, count + 1);
        kani::assert(next > here, "header grows with chunk count");
        kani::assert(here <= 4 + 8192 + 12 * MAX_CHUNKS, "header size bounded");
    }
}
