// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Roaring-format skip sets for search-time document demotion.
//!
//! A skip set is a set of 32-bit document ids that a query wants pushed to the
//! bottom of its results. It arrives once per query as a portable Roaring
//! bitmap (usually base64 in a script parameter), is decoded once, and is then
//! probed for every candidate document in every index segment.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌────────────────┐     ┌───────────────┐
//! │  binary/    │────▶│ chunk_index.rs │────▶│ membership.rs │
//! │(deserialize,│     │ (ChunkIndex,   │     │ (SkipSet,     │
//! │ encode_ids) │     │  fingerprint)  │     │  contains)    │
//! └─────────────┘     └────────────────┘     └───────────────┘
//!        │                    │                      │
//!        ▼                    ▼                      ▼
//! ┌─────────────┐     ┌────────────────┐     ┌───────────────┐
//! │  error.rs   │     │  container/    │     │  scoring/     │
//! │ (Malformed, │     │ (Array/Bitmap, │     │ (factory,     │
//! │  Setup)     │     │  4096 cutoff)  │     │  LeafScorer)  │
//! └─────────────┘     └────────────────┘     └───────────────┘
//!                                                    ▲
//!                                             ┌──────┴──────┐
//!                                             │  params.rs  │
//!                                             └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use skipset::{encode_base64, encode_ids, ScriptParams, SkipListFactory};
//! use serde_json::json;
//!
//! let mut bytes = Vec::new();
//! encode_ids([5, 70000, 131071], &mut bytes);
//!
//! let params = json!({ "skip": encode_base64(&bytes), "field_name": "id" });
//! let params = ScriptParams::from_map(params.as_object().unwrap()).unwrap();
//! let leaf = SkipListFactory::new(&params).unwrap().new_leaf();
//!
//! assert_eq!(leaf.score(&json!({ "id": 70000 })), 0.0);
//! assert_eq!(leaf.score(&json!({ "id": 70001 })), 1.0);
//! assert_eq!(leaf.score(&json!({ "title": "no id" })), 1.0);
//! ```

pub mod binary;
mod chunk_index;
pub mod container;
pub mod contracts;
mod error;
mod membership;
mod params;
mod scoring;

pub use binary::{
    decode_base64, deserialize, encode_base64, encode_ids, encode_ids_with_runs,
};
pub use chunk_index::{ChunkIndex, ChunkInfo};
pub use container::{Container, ContainerKind, ARRAY_MAX_CARDINALITY};
pub use error::{MalformedInputError, SetupError};
pub use membership::{high_key, low_key, SkipSet};
pub use params::{
    ScriptParams, PARAM_BASELINE_SCORE, PARAM_FIELD_NAME, PARAM_MEMBER_SCORE, PARAM_SKIP,
};
#[cfg(feature = "parallel")]
pub use scoring::score_segments_parallel;
pub use scoring::{
    resolve_id, score_segments, DocValues, FieldValue, LeafScorer, ScorePolicy, SkipListFactory,
    Unresolved, Verdict, DEFAULT_BASELINE_SCORE, DEFAULT_MEMBER_SCORE, SCRIPT_NAME,
};
