// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The read-only query surface: is this id in the skip set?
//!
//! `SkipSet` owns one `ChunkIndex` and answers `contains` by splitting the
//! id into a high key (which chunk) and a low key (which member of that
//! chunk). One binary search over at most 65536 keys, then one binary search
//! over at most 4096 values or one bit test. No allocation, no errors: an id
//! that isn't there is simply not a member.

use crate::binary::{decode_base64, deserialize};
use crate::chunk_index::ChunkIndex;
use crate::error::{MalformedInputError, SetupError};

/// High 16 bits: which chunk.
#[inline]
pub fn high_key(id: u32) -> u16 {
    (id >> 16) as u16
}

/// Low 16 bits: which member of the chunk.
#[inline]
pub fn low_key(id: u32) -> u16 {
    (id & 0xFFFF) as u16
}

/// An immutable set of document ids to demote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet {
    index: ChunkIndex,
}

impl SkipSet {
    /// Deserialize raw portable-format bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MalformedInputError> {
        Ok(Self {
            index: deserialize(bytes)?,
        })
    }

    /// Decode base64, then deserialize.
    pub fn from_base64(text: &str) -> Result<Self, SetupError> {
        let bytes = decode_base64(text)?;
        Ok(Self::from_bytes(&bytes)?)
    }

    /// Membership test.
    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.index
            .lookup(high_key(id))
            .is_some_and(|container| container.contains(low_key(id)))
    }

    /// Number of members.
    pub fn len(&self) -> u64 {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.index.iter()
    }

    /// The underlying chunk index, for inspection.
    pub fn index(&self) -> &ChunkIndex {
        &self.index
    }
}

impl From<ChunkIndex> for SkipSet {
    fn from(index: ChunkIndex) -> Self {
        Self { index }
    }
}
