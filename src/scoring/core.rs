// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Identifier resolution and the member/non-member score policy.
//!
//! The whole policy is two numbers: what a member scores and what everything
//! else scores. The interesting part is "everything else". A document whose
//! id field is missing, empty, a float, negative or garbage is not a member,
//! and scores the baseline like any other non-member. Scoring never fails.
//! One odd document should cost a slightly wrong score, not the whole
//! request.

use std::fmt;
use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

use super::values::FieldValue;

/// Default score for documents in the skip set.
pub const DEFAULT_MEMBER_SCORE: f64 = 0.0;

/// Default score for everything else.
pub const DEFAULT_BASELINE_SCORE: f64 = 1.0;

/// Why a document's id could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unresolved {
    /// The field is absent or has no values.
    MissingField,
    /// The value is not an integer (float, text, boolean).
    NotAnInteger,
    /// An integer, but outside `0..=u32::MAX`.
    OutOfRange,
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::MissingField => write!(f, "missing field"),
            Unresolved::NotAnInteger => write!(f, "not an integer"),
            Unresolved::OutOfRange => write!(f, "out of range"),
        }
    }
}

/// Outcome of checking one document against the skip set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict", content = "detail")]
pub enum Verdict {
    Member(u32),
    NonMember(u32),
    Unresolved(Unresolved),
}

impl Verdict {
    pub fn is_member(self) -> bool {
        matches!(self, Verdict::Member(_))
    }
}

/// Resolve a field's first value to a document id.
///
/// Integers in `0..=u32::MAX` resolve, whether stored as a number or as
/// decimal text (an optional leading `+` is accepted). Floats never resolve,
/// even integral ones, and neither does text with surrounding whitespace.
/// Negative ids are `OutOfRange`; they are not reinterpreted as their
/// unsigned 32-bit pattern, so a producer that stored `-1` for 4294967295
/// will see such documents score the baseline.
pub fn resolve_id(value: Option<FieldValue<'_>>) -> Result<u32, Unresolved> {
    match value {
        None => Err(Unresolved::MissingField),
        Some(FieldValue::Long(n)) => u32::try_from(n).map_err(|_| Unresolved::OutOfRange),
        Some(FieldValue::Double(_)) => Err(Unresolved::NotAnInteger),
        Some(FieldValue::Keyword(text)) => match text.parse::<i64>() {
            Ok(n) => u32::try_from(n).map_err(|_| Unresolved::OutOfRange),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    Err(Unresolved::OutOfRange)
                }
                _ => Err(Unresolved::NotAnInteger),
            },
        },
    }
}

/// Scores handed out for members and for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePolicy {
    pub member_score: f64,
    pub baseline_score: f64,
}

impl Default for ScorePolicy {
    fn default() -> Self {
        Self {
            member_score: DEFAULT_MEMBER_SCORE,
            baseline_score: DEFAULT_BASELINE_SCORE,
        }
    }
}

impl ScorePolicy {
    /// Members get the member score; non-members and unresolved documents
    /// get the baseline.
    #[inline]
    pub fn score(&self, verdict: Verdict) -> f64 {
        if verdict.is_member() {
            self.member_score
        } else {
            self.baseline_score
        }
    }
}
