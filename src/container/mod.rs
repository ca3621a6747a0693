// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-chunk containers: the low 16 bits of every member.
//!
//! A chunk is the slice of the 32-bit universe that shares one high key. Its
//! members are held in one of two shapes, picked by how many there are:
//!
//! | Cardinality | Variant  | Memory          | `contains`  |
//! |-------------|----------|-----------------|-------------|
//! | 1..=4096    | `Array`  | 2 bytes/member  | binary search |
//! | 4097..      | `Bitmap` | 8 KiB fixed     | bit test    |
//!
//! The variant is a pure function of the member count. The wire format can
//! also deliver a chunk as runs; those are expanded into whichever of the two
//! variants the count selects, so nothing downstream ever sees a third shape.

mod array;
mod bitmap;

pub use array::ArrayContainer;
pub use bitmap::{BitmapContainer, BitmapIter};

pub(crate) use bitmap::set_range;

use std::fmt;

use crate::contracts::check_variant_matches_cardinality;

/// Largest cardinality stored as a sorted array.
pub const ARRAY_MAX_CARDINALITY: usize = 4096;

/// Words in a bitmap container (65536 bits).
pub const BITMAP_WORDS: usize = 1024;

/// Bytes in a serialized bitmap container.
pub const BITMAP_BYTES: usize = BITMAP_WORDS * 8;

/// Which representation a container uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Array,
    Bitmap,
}

impl ContainerKind {
    /// The variant a chunk with `cardinality` members must use.
    #[inline]
    pub fn for_cardinality(cardinality: usize) -> Self {
        if cardinality <= ARRAY_MAX_CARDINALITY {
            ContainerKind::Array
        } else {
            ContainerKind::Bitmap
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Array => write!(f, "array"),
            ContainerKind::Bitmap => write!(f, "bitmap"),
        }
    }
}

/// The low-16-bit members of one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Container {
    Array(ArrayContainer),
    Bitmap(BitmapContainer),
}

impl Container {
    pub(crate) fn array(values: Vec<u16>) -> Self {
        let container = Container::Array(ArrayContainer::from_sorted(values));
        check_variant_matches_cardinality(&container);
        container
    }

    pub(crate) fn bitmap(words: Vec<u64>) -> Self {
        let container = Container::Bitmap(BitmapContainer::from_words(words));
        check_variant_matches_cardinality(&container);
        container
    }

    /// Expand validated runs `(start, end_inclusive)` into the variant that
    /// `cardinality` selects.
    pub(crate) fn from_runs(runs: &[(u16, u16)], cardinality: usize) -> Self {
        match ContainerKind::for_cardinality(cardinality) {
            ContainerKind::Array => {
                let mut values = Vec::with_capacity(cardinality);
                for &(start, end) in runs {
                    values.extend(start..=end);
                }
                Container::array(values)
            }
            ContainerKind::Bitmap => {
                let mut words = vec![0u64; BITMAP_WORDS];
                for &(start, end) in runs {
                    set_range(&mut words, start, end);
                }
                Container::bitmap(words)
            }
        }
    }

    #[inline]
    pub fn contains(&self, low: u16) -> bool {
        match self {
            Container::Array(array) => array.contains(low),
            Container::Bitmap(bitmap) => bitmap.contains(low),
        }
    }

    #[inline]
    pub fn cardinality(&self) -> u32 {
        match self {
            Container::Array(array) => array.cardinality(),
            Container::Bitmap(bitmap) => bitmap.cardinality(),
        }
    }

    pub fn kind(&self) -> ContainerKind {
        match self {
            Container::Array(_) => ContainerKind::Array,
            Container::Bitmap(_) => ContainerKind::Bitmap,
        }
    }

    pub fn min(&self) -> Option<u16> {
        match self {
            Container::Array(array) => array.min(),
            Container::Bitmap(bitmap) => bitmap.min(),
        }
    }

    pub fn max(&self) -> Option<u16> {
        match self {
            Container::Array(array) => array.max(),
            Container::Bitmap(bitmap) => bitmap.max(),
        }
    }

    /// Low keys in ascending order.
    pub fn iter(&self) -> ContainerIter<'_> {
        match self {
            Container::Array(array) => ContainerIter::Array(array.values().iter()),
            Container::Bitmap(bitmap) => ContainerIter::Bitmap(bitmap.iter()),
        }
    }

    /// Feed the canonical content of this container to a CRC32 hasher.
    pub(crate) fn hash_into(&self, hasher: &mut crc32fast::Hasher) {
        hasher.update(&self.cardinality().to_le_bytes());
        match self {
            Container::Array(array) => {
                hasher.update(&[0]);
                for value in array.values() {
                    hasher.update(&value.to_le_bytes());
                }
            }
            Container::Bitmap(bitmap) => {
                hasher.update(&[1]);
                for word in bitmap.words() {
                    hasher.update(&word.to_le_bytes());
                }
            }
        }
    }
}

/// Ascending iterator over a container's low keys.
#[derive(Debug, Clone)]
pub enum ContainerIter<'a> {
    Array(std::slice::Iter<'a, u16>),
    Bitmap(BitmapIter<'a>),
}

impl Iterator for ContainerIter<'_> {
    type Item = u16;

    #[inline]
    fn next(&mut self) -> Option<u16> {
        match self {
            ContainerIter::Array(iter) => iter.next().copied(),
            ContainerIter::Bitmap(iter) => iter.next(),
        }
    }
}
