// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounds-checked little-endian reads over a byte slice.
//!
//! Every read in the deserializer goes through `ByteReader`, so there is
//! exactly one place that can index past the end of the input, and it
//! doesn't. A short read becomes `MalformedInputError::Truncated` with the
//! offset, the byte count wanted and the byte count left.
//!
//! The reader borrows; `take` hands back subslices of the original input, so
//! payloads are parsed straight from the caller's buffer without a copy.

use crate::error::MalformedInputError;

/// Forward-only cursor over borrowed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Absolute offset of the next unread byte.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Fail unless at least `needed` more bytes are available.
    #[inline]
    pub fn ensure(&self, needed: usize) -> Result<(), MalformedInputError> {
        if needed > self.remaining() {
            return Err(MalformedInputError::Truncated {
                offset: self.pos,
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Consume the next `len` bytes.
    #[inline]
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], MalformedInputError> {
        self.ensure(len)?;
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, MalformedInputError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, MalformedInputError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Append `values` as little-endian `u16`s.
pub fn write_u16s(values: &[u16], buf: &mut Vec<u8>) {
    buf.reserve(values.len() * 2);
    for v in values {
        buf.extend_from_slice(&v.to_le_bytes());
    }
}

/// Append `words` as little-endian `u64`s.
pub fn write_u64s(words: &[u64], buf: &mut Vec<u8>) {
    buf.reserve(words.len() * 8);
    for w in words {
        buf.extend_from_slice(&w.to_le_bytes());
    }
}
