// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring arbitrary documents never fails.
//!
//! Whatever the document holds in the id field (numbers of any size, text,
//! nested junk, nothing at all) the scorer must answer with either the
//! member score or the baseline.

#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::{json, Value};
use skipset::{encode_base64, encode_ids, SkipListFactory};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(doc) = serde_json::from_str::<Value>(text) else {
        return;
    };

    let mut bytes = Vec::new();
    encode_ids([0, 5, 70000, 131071, u32::MAX], &mut bytes);
    let params = json!({ "skip": encode_base64(&bytes), "field_name": "id" });
    let factory =
        SkipListFactory::from_param_map(params.as_object().expect("object")).expect("valid params");
    let leaf = factory.new_leaf();

    let score = leaf.score(&doc);
    assert!(score == 0.0 || score == 1.0);

    let wrapped = json!({ "id": doc });
    let score = leaf.score(&wrapped);
    assert!(score == 0.0 || score == 1.0);
});
