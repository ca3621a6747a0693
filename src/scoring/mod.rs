// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring adapter: turns skip-set membership into a per-document score.
//!
//! The host search engine calls us in three phases. Once per query it hands
//! over the parameter map and we build a `SkipListFactory`, which is the only
//! point where anything can fail. Once per index segment it asks for a
//! `LeafScorer`. Once per document it asks for a score, and we answer with
//! the member score or the baseline, never an error.
//!
//! ```text
//! params ──► SkipListFactory::new ──► Arc<SkipSet>
//!                                        │
//!             new_leaf() per segment ────┤
//!                                        ▼
//! doc ──► DocValues::first_value ──► resolve_id ──► contains ──► ScorePolicy
//! ```

mod core;
mod leaf;
mod values;

pub use self::core::*;
pub use leaf::*;
pub use values::{DocValues, FieldValue};
