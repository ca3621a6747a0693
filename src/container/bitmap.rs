// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed 65536-bit container for dense chunks.
//!
//! 1024 `u64` words, one bit per low key. Membership is a shift and a mask.
//! The population count is computed once at construction and cached, since
//! the deserializer has to compute it anyway to check the declared
//! cardinality.

use super::BITMAP_WORDS;

/// One bit per low key, with a cached population count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitmapContainer {
    words: Box<[u64]>,
    cardinality: u32,
}

impl BitmapContainer {
    /// Wrap a full word array, counting its bits.
    pub(crate) fn from_words(words: Vec<u64>) -> Self {
        debug_assert_eq!(words.len(), BITMAP_WORDS, "bitmap must hold exactly 1024 words");
        let cardinality = words.iter().map(|w| w.count_ones()).sum();
        Self {
            words: words.into_boxed_slice(),
            cardinality,
        }
    }

    /// Direct bit test. O(1).
    #[inline]
    pub fn contains(&self, low: u16) -> bool {
        (self.words[word_index(low)] >> bit_offset(low)) & 1 == 1
    }

    #[inline]
    pub fn cardinality(&self) -> u32 {
        self.cardinality
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub fn min(&self) -> Option<u16> {
        self.words
            .iter()
            .position(|&w| w != 0)
            .map(|i| (i * 64 + self.words[i].trailing_zeros() as usize) as u16)
    }

    pub fn max(&self) -> Option<u16> {
        self.words
            .iter()
            .rposition(|&w| w != 0)
            .map(|i| (i * 64 + 63 - self.words[i].leading_zeros() as usize) as u16)
    }

    pub fn iter(&self) -> BitmapIter<'_> {
        BitmapIter {
            words: &self.words,
            index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

/// Which word holds `low`.
#[inline]
pub(crate) fn word_index(low: u16) -> usize {
    (low >> 6) as usize
}

/// Which bit of that word.
#[inline]
pub(crate) fn bit_offset(low: u16) -> u32 {
    u32::from(low & 63)
}

/// Set bits `start..=end` in a 1024-word bitmap.
pub(crate) fn set_range(words: &mut [u64], start: u16, end: u16) {
    debug_assert!(start <= end);
    let (first, last) = (word_index(start), word_index(end));
    let head = !0u64 << bit_offset(start);
    let tail = !0u64 >> (63 - bit_offset(end));

    if first == last {
        words[first] |= head & tail;
        return;
    }

    words[first] |= head;
    for word in &mut words[first + 1..last] {
        *word = !0;
    }
    words[last] |= tail;
}

/// Ascending iterator over the set bits of a bitmap container.
#[derive(Debug, Clone)]
pub struct BitmapIter<'a> {
    words: &'a [u64],
    index: usize,
    current: u64,
}

impl Iterator for BitmapIter<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        while self.current == 0 {
            self.index += 1;
            self.current = *self.words.get(self.index)?;
        }
        let bit = self.current.trailing_zeros() as usize;
        // Clear the lowest set bit
        self.current &= self.current - 1;
        Some((self.index * 64 + bit) as u16)
    }
}
