// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Writer and reader agree on every id set.
//!
//! Both layouts must decode to exactly the ids that went in, with the same
//! fingerprint, whatever mix of arrays, bitmaps and runs the ids produce.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use skipset::{deserialize, encode_ids, encode_ids_with_runs};

#[derive(Debug, Arbitrary)]
struct Input {
    singles: Vec<u32>,
    /// (start, length) ranges, so dense chunks show up
    ranges: Vec<(u32, u16)>,
}

fuzz_target!(|input: Input| {
    let mut ids = input.singles;
    for (start, len) in input.ranges.into_iter().take(4) {
        ids.extend((0..u32::from(len)).map_while(|i| start.checked_add(i)));
    }

    let mut plain = Vec::new();
    encode_ids(ids.iter().copied(), &mut plain);
    let mut runs = Vec::new();
    encode_ids_with_runs(ids.iter().copied(), &mut runs);

    let a = deserialize(&plain).expect("plain layout decodes");
    let b = deserialize(&runs).expect("run layout decodes");
    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());

    ids.sort_unstable();
    ids.dedup();
    assert!(a.iter().eq(ids.iter().copied()));
});
