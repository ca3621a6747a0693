// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Document field access, as the host exposes it.
//!
//! The host runtime owns documents; we only ever ask it for the first value
//! of one field. `DocValues` is that one question. A JSON implementation is
//! provided for the CLI and tests: the field name is tried as a literal key
//! first (`"kw.id"` is a legal key), then as a dotted path into nested
//! objects. Arrays are multi-valued fields, and only their first element
//! counts.

use serde_json::{Map, Value};

/// A single field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Long(i64),
    Double(f64),
    Keyword(&'a str),
}

/// Read access to the current document's fields.
pub trait DocValues {
    /// First value of `field`, or `None` when absent or empty.
    fn first_value(&self, field: &str) -> Option<FieldValue<'_>>;
}

impl DocValues for Map<String, Value> {
    fn first_value(&self, field: &str) -> Option<FieldValue<'_>> {
        if let Some(value) = self.get(field) {
            return json_first_value(value);
        }
        lookup_path(self, field).and_then(json_first_value)
    }
}

impl DocValues for Value {
    fn first_value(&self, field: &str) -> Option<FieldValue<'_>> {
        self.as_object().and_then(|map| map.first_value(field))
    }
}

/// Walk `a.b.c` through nested objects.
fn lookup_path<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = map.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn json_first_value(value: &Value) -> Option<FieldValue<'_>> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(FieldValue::Long(i)),
            None => n.as_f64().map(FieldValue::Double),
        },
        Value::String(s) => Some(FieldValue::Keyword(s)),
        Value::Bool(b) => Some(FieldValue::Keyword(if *b { "true" } else { "false" })),
        Value::Array(items) => items.first().and_then(json_first_value),
        Value::Null | Value::Object(_) => None,
    }
}
