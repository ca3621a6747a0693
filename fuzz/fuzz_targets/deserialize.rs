// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Wire format parsing under adversarial input.
//!
//! The skip set comes from whoever sent the query. The worst a crafted one
//! may do is fail setup with an error: no panic, no huge allocation from a
//! lying chunk count, no set that answers differently from what it iterates.

#![no_main]

use libfuzzer_sys::fuzz_target;
use skipset::{deserialize, ContainerKind};

fuzz_target!(|data: &[u8]| {
    let Ok(index) = deserialize(data) else {
        return;
    };

    // Keys strictly ascending
    assert!(index.keys().windows(2).all(|w| w[0] < w[1]));

    let mut total = 0u64;
    for chunk in index.chunks() {
        // Variant follows cardinality
        assert_eq!(chunk.kind, ContainerKind::for_cardinality(chunk.cardinality as usize));
        assert!(chunk.first <= chunk.last);
        total += u64::from(chunk.cardinality);
    }
    assert_eq!(total, index.len());

    // Iteration is strictly ascending and agrees with lookup
    let mut previous: Option<u32> = None;
    for id in index.iter().take(10_000) {
        assert!(previous.map_or(true, |p| p < id));
        let container = index.lookup((id >> 16) as u16).expect("iterated chunk exists");
        assert!(container.contains(id as u16));
        previous = Some(id);
    }
});
