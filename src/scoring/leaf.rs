// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query-level factory and per-segment scorers.
//!
//! The factory decodes the skip set once and keeps it behind an `Arc`. Each
//! segment gets its own `LeafScorer` holding a clone of that `Arc`, so any
//! number of segments can be scored on any number of threads against one
//! immutable set.

use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{trace, warn};

use super::core::{resolve_id, ScorePolicy, Verdict};
use super::values::DocValues;
use crate::error::SetupError;
use crate::membership::SkipSet;
use crate::params::ScriptParams;

/// Name under which the host registers this script.
pub const SCRIPT_NAME: &str = "skip_list";

/// Query-scoped state: the decoded skip set, the id field and the policy.
#[derive(Debug, Clone)]
pub struct SkipListFactory {
    set: Arc<SkipSet>,
    field: Arc<str>,
    policy: ScorePolicy,
}

impl SkipListFactory {
    /// Decode the skip set named by `params`.
    ///
    /// Fails when `skip` is not base64 or does not decode to a valid set. A
    /// failure here rejects the whole query before any document is scored.
    pub fn new(params: &ScriptParams) -> Result<Self, SetupError> {
        let set = SkipSet::from_base64(&params.skip).inspect_err(|e| {
            warn!(field = %params.field_name, error = %e, "rejecting skip_list script");
        })?;
        Ok(Self::with_set(set, &params.field_name, params.policy))
    }

    /// Validate a raw parameter map, then decode.
    pub fn from_param_map(
        map: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, SetupError> {
        let params = ScriptParams::from_map(map).inspect_err(|e| {
            warn!(error = %e, "rejecting skip_list script");
        })?;
        Self::new(&params)
    }

    /// Build around an already decoded set.
    pub fn with_set(set: SkipSet, field: &str, policy: ScorePolicy) -> Self {
        Self {
            set: Arc::new(set),
            field: Arc::from(field),
            policy,
        }
    }

    /// A scorer for one segment. Cheap: two reference count bumps.
    pub fn new_leaf(&self) -> LeafScorer {
        LeafScorer {
            set: Arc::clone(&self.set),
            field: Arc::clone(&self.field),
            policy: self.policy,
        }
    }

    /// The host need not compute a relevance score for us.
    pub fn needs_score(&self) -> bool {
        false
    }

    /// Same parameters and documents always give the same scores.
    pub fn is_result_deterministic(&self) -> bool {
        true
    }

    pub fn skip_set(&self) -> &SkipSet {
        &self.set
    }

    pub fn field_name(&self) -> &str {
        &self.field
    }

    pub fn policy(&self) -> ScorePolicy {
        self.policy
    }
}

/// Per-segment scorer.
#[derive(Debug, Clone)]
pub struct LeafScorer {
    set: Arc<SkipSet>,
    field: Arc<str>,
    policy: ScorePolicy,
}

impl LeafScorer {
    /// Classify `doc` without scoring it.
    pub fn explain<D: DocValues + ?Sized>(&self, doc: &D) -> Verdict {
        match resolve_id(doc.first_value(&self.field)) {
            Ok(id) if self.set.contains(id) => Verdict::Member(id),
            Ok(id) => Verdict::NonMember(id),
            Err(reason) => {
                trace!(field = %self.field, %reason, "unresolved document id");
                Verdict::Unresolved(reason)
            }
        }
    }

    /// Member score for members, baseline for everything else.
    #[inline]
    pub fn score<D: DocValues + ?Sized>(&self, doc: &D) -> f64 {
        self.policy.score(self.explain(doc))
    }
}

/// Score each segment with its own `LeafScorer`, one after another.
pub fn score_segments<D: DocValues>(factory: &SkipListFactory, segments: &[Vec<D>]) -> Vec<Vec<f64>> {
    segments
        .iter()
        .map(|docs| {
            let leaf = factory.new_leaf();
            docs.iter().map(|doc| leaf.score(doc)).collect()
        })
        .collect()
}

/// Score segments across the rayon pool. Output order matches input order.
#[cfg(feature = "parallel")]
pub fn score_segments_parallel<D: DocValues + Sync>(
    factory: &SkipListFactory,
    segments: &[Vec<D>],
) -> Vec<Vec<f64>> {
    segments
        .par_iter()
        .map(|docs| {
            let leaf = factory.new_leaf();
            docs.iter().map(|doc| leaf.score(doc)).collect()
        })
        .collect()
}
