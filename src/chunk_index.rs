// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! High-key index: which container holds which chunk.
//!
//! Two parallel vectors, keys and containers, with keys strictly ascending.
//! Lookup is a binary search over the keys. A skip set of ten million dense
//! ids spans about 150 chunks, so that search is eight comparisons; even the
//! pathological one-id-per-chunk set tops out at sixteen.
//!
//! An index is only ever produced by the deserializer and is never mutated
//! afterwards, so `&ChunkIndex` is safe to share across threads.

use crate::container::{Container, ContainerKind};
use crate::contracts::{check_index_aligned, check_keys_ascending};

/// Ordered mapping from a 16-bit high key to the container for that chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ChunkIndex {
    keys: Vec<u16>,
    containers: Vec<Container>,
}

/// Summary of one chunk, for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkInfo {
    pub key: u16,
    pub kind: ContainerKind,
    pub cardinality: u32,
    /// Smallest member as a full 32-bit id.
    pub first: u32,
    /// Largest member as a full 32-bit id.
    pub last: u32,
}

impl ChunkIndex {
    /// Assemble an index from validated parts.
    pub(crate) fn from_parts(keys: Vec<u16>, containers: Vec<Container>) -> Self {
        check_keys_ascending(&keys);
        check_index_aligned(&keys, &containers);
        Self { keys, containers }
    }

    /// The container for `high_key`, or `None` when the chunk is empty.
    #[inline]
    pub fn lookup(&self, high_key: u16) -> Option<&Container> {
        self.keys
            .binary_search(&high_key)
            .ok()
            .map(|i| &self.containers[i])
    }

    /// Number of non-empty chunks.
    pub fn chunk_count(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Total number of members across all chunks.
    pub fn len(&self) -> u64 {
        self.containers
            .iter()
            .map(|c| u64::from(c.cardinality()))
            .sum()
    }

    pub fn keys(&self) -> &[u16] {
        &self.keys
    }

    /// One summary per chunk, in key order.
    pub fn chunks(&self) -> impl Iterator<Item = ChunkInfo> + '_ {
        self.keys
            .iter()
            .zip(&self.containers)
            .map(|(&key, container)| {
                let base = u32::from(key) << 16;
                ChunkInfo {
                    key,
                    kind: container.kind(),
                    cardinality: container.cardinality(),
                    first: base | u32::from(container.min().unwrap_or(0)),
                    last: base | u32::from(container.max().unwrap_or(0)),
                }
            })
    }

    /// Every member as a full 32-bit id, ascending.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.keys
            .iter()
            .zip(&self.containers)
            .flat_map(|(&key, container)| {
                let base = u32::from(key) << 16;
                container.iter().map(move |low| base | u32::from(low))
            })
    }

    /// CRC32 over keys and container contents.
    ///
    /// Two indexes with the same members and the same variants always have
    /// the same fingerprint. Used to check that queries leave the index
    /// untouched, and printed by `skipset inspect`.
    pub fn fingerprint(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&(self.keys.len() as u32).to_le_bytes());
        for (key, container) in self.keys.iter().zip(&self.containers) {
            hasher.update(&key.to_le_bytes());
            container.hash_into(&mut hasher);
        }
        hasher.finalize()
    }
}
