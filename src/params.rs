// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Script parameters: the per-query configuration of the skip-list script.
//!
//! The host passes an untyped JSON-like map. We pull four keys out of it:
//!
//! | key              | type   | required | default |
//! |------------------|--------|----------|---------|
//! | `skip`           | string | yes      |         |
//! | `field_name`     | string | yes      |         |
//! | `baseline_score` | number | no       | `1.0`   |
//! | `member_score`   | number | no       | `0.0`   |
//!
//! Unknown keys are ignored; hosts add their own. Validation is strict about
//! the keys we do read, so a typo'd type fails the query instead of silently
//! scoring with a default.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SetupError;
use crate::scoring::{ScorePolicy, DEFAULT_BASELINE_SCORE, DEFAULT_MEMBER_SCORE};

pub const PARAM_SKIP: &str = "skip";
pub const PARAM_FIELD_NAME: &str = "field_name";
pub const PARAM_BASELINE_SCORE: &str = "baseline_score";
pub const PARAM_MEMBER_SCORE: &str = "member_score";

/// Validated script parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptParams {
    /// Base64 of the portable-format skip set. Not decoded yet.
    pub skip: String,
    /// Document field holding the numeric id.
    pub field_name: String,
    #[serde(flatten)]
    pub policy: ScorePolicy,
}

impl ScriptParams {
    /// Validate a parameter map.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, SetupError> {
        let skip = required_str(map, PARAM_SKIP)?.to_string();

        let field_name = required_str(map, PARAM_FIELD_NAME)?;
        if field_name.is_empty() {
            return Err(SetupError::InvalidParameter {
                name: PARAM_FIELD_NAME,
                reason: "must not be empty".to_string(),
            });
        }

        let policy = ScorePolicy {
            member_score: optional_score(map, PARAM_MEMBER_SCORE, DEFAULT_MEMBER_SCORE)?,
            baseline_score: optional_score(map, PARAM_BASELINE_SCORE, DEFAULT_BASELINE_SCORE)?,
        };

        Ok(Self {
            skip,
            field_name: field_name.to_string(),
            policy,
        })
    }

    /// Parse a JSON object and validate it.
    pub fn from_json(text: &str) -> Result<Self, SetupError> {
        let value: Value = serde_json::from_str(text).map_err(|e| SetupError::InvalidParameter {
            name: "params",
            reason: e.to_string(),
        })?;
        match value {
            Value::Object(map) => Self::from_map(&map),
            other => Err(SetupError::InvalidParameter {
                name: "params",
                reason: format!("expected a JSON object, got {}", json_type(&other)),
            }),
        }
    }

    /// Read a JSON params file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SetupError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Render as the JSON map a host would send.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            PARAM_SKIP: self.skip,
            PARAM_FIELD_NAME: self.field_name,
            PARAM_MEMBER_SCORE: self.policy.member_score,
            PARAM_BASELINE_SCORE: self.policy.baseline_score,
        })
    }
}

fn required_str<'a>(map: &'a Map<String, Value>, name: &'static str) -> Result<&'a str, SetupError> {
    match map.get(name) {
        None | Some(Value::Null) => Err(SetupError::MissingParameter(name)),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(SetupError::InvalidParameter {
            name,
            reason: format!("expected a string, got {}", json_type(other)),
        }),
    }
}

fn optional_score(
    map: &Map<String, Value>,
    name: &'static str,
    default: f64,
) -> Result<f64, SetupError> {
    let value = match map.get(name) {
        None | Some(Value::Null) => return Ok(default),
        Some(Value::Number(n)) => n.as_f64(),
        Some(other) => {
            return Err(SetupError::InvalidParameter {
                name,
                reason: format!("expected a number, got {}", json_type(other)),
            })
        }
    };
    match value {
        Some(score) if score.is_finite() => Ok(score),
        _ => Err(SetupError::InvalidParameter {
            name,
            reason: "must be a finite number".to_string(),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
