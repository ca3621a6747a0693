// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sorted-array container for sparse chunks.
//!
//! Up to 4096 low keys stored as a plain ascending `u16` slice. At that size
//! the array is at most 8 KiB, the same as a bitmap, and a binary search over
//! it touches a dozen cache lines at worst. Past 4096 the bitmap wins on both
//! counts, which is why the threshold exists.

use super::ARRAY_MAX_CARDINALITY;
use crate::contracts::check_array_ascending;

/// Ascending, duplicate-free low keys of one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayContainer {
    values: Box<[u16]>,
}

impl ArrayContainer {
    /// Wrap values the deserializer has already validated.
    pub(crate) fn from_sorted(values: Vec<u16>) -> Self {
        check_array_ascending(&values);
        debug_assert!(
            !values.is_empty() && values.len() <= ARRAY_MAX_CARDINALITY,
            "array container cardinality {} outside 1..={}",
            values.len(),
            ARRAY_MAX_CARDINALITY
        );
        Self {
            values: values.into_boxed_slice(),
        }
    }

    /// Binary search. O(log n) with n <= 4096.
    #[inline]
    pub fn contains(&self, low: u16) -> bool {
        self.values.binary_search(&low).is_ok()
    }

    #[inline]
    pub fn cardinality(&self) -> u32 {
        self.values.len() as u32
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }

    pub fn min(&self) -> Option<u16> {
        self.values.first().copied()
    }

    pub fn max(&self) -> Option<u16> {
        self.values.last().copied()
    }
}
