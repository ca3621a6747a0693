// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the in-memory skip set.
//!
//! The deserializer rejects bad input with a `MalformedInputError`. These
//! checks sit one layer below that: they assert the invariants the rest of
//! the crate relies on, at the point where validated data is wrapped into
//! containers and indexes. If one fires, the deserializer let something
//! through that it should have rejected.
//!
//! 1. **Zero-cost in release builds** (`debug_assert!`)
//! 2. **Early failure** in tests and fuzzing, where debug assertions are on
//!
//! | Contract                            | Invariant                               |
//! |-------------------------------------|-----------------------------------------|
//! | `check_array_ascending`             | array payload strictly ascending        |
//! | `check_variant_matches_cardinality` | variant chosen by member count only     |
//! | `check_keys_ascending`              | chunk keys strictly ascending, unique   |
//! | `check_index_aligned`               | one container per key                   |

// ============================================================================
// COMPILE-TIME ASSERTIONS
// ============================================================================

/// A full array container must not be larger than a bitmap container,
/// otherwise the 4096 threshold would be pointless.
const _: () = {
    use crate::container::{ARRAY_MAX_CARDINALITY, BITMAP_BYTES};
    assert!(ARRAY_MAX_CARDINALITY * 2 <= BITMAP_BYTES);
};

use crate::container::{Container, ContainerKind};

// ============================================================================
// CONTAINER CONTRACTS
// ============================================================================

/// Array payloads are strictly ascending (sorted, no duplicates).
///
/// # Panics (debug builds only)
/// Panics at the first position where `values[i] >= values[i + 1]`.
#[inline]
pub fn check_array_ascending(values: &[u16]) {
    debug_assert!(
        values.windows(2).all(|w| w[0] < w[1]),
        "array container not strictly ascending"
    );
}

/// The variant matches what the member count selects.
#[inline]
pub fn check_variant_matches_cardinality(container: &Container) {
    debug_assert_eq!(
        container.kind(),
        ContainerKind::for_cardinality(container.cardinality() as usize),
        "container variant does not match cardinality {}",
        container.cardinality()
    );
}

// ============================================================================
// INDEX CONTRACTS
// ============================================================================

/// Chunk keys are strictly ascending.
#[inline]
pub fn check_keys_ascending(keys: &[u16]) {
    debug_assert!(
        keys.windows(2).all(|w| w[0] < w[1]),
        "chunk keys not strictly ascending"
    );
}

/// Keys and containers line up one to one.
#[inline]
pub fn check_index_aligned(keys: &[u16], containers: &[Container]) {
    debug_assert_eq!(
        keys.len(),
        containers.len(),
        "{} keys but {} containers",
        keys.len(),
        containers.len()
    );
}
