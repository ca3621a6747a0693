// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for decoding and setup.
//!
//! Two families, two moments. `MalformedInputError` comes out of the
//! deserializer when the bytes don't describe a valid skip set. `SetupError`
//! comes out of the scoring factory when its parameters are missing or bad.
//! Both happen once, before the first document is scored. Nothing in the
//! per-document path returns an error at all.

use thiserror::Error;

/// The wire bytes are structurally invalid.
///
/// Every variant carries enough position information to find the bad byte
/// in a hex dump. Offsets are absolute from the start of the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInputError {
    /// A read ran past the end of the input.
    #[error("input truncated: {needed} bytes needed at offset {offset}, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The leading cookie is neither of the two portable-format cookies.
    #[error("unknown cookie {0:#010x}")]
    InvalidCookie(u32),

    /// More chunks than there are 16-bit keys.
    #[error("chunk count {0} exceeds 65536")]
    TooManyChunks(u64),

    /// High keys must be strictly ascending.
    #[error("chunk {index} has key {key} after key {previous} (keys must be strictly ascending)")]
    UnorderedKeys { index: usize, previous: u16, key: u16 },

    /// Array payload values must be strictly ascending.
    #[error("array container for key {key} is not strictly ascending at position {position}")]
    UnsortedArray { key: u16, position: usize },

    /// The payload holds a different number of members than the header claims.
    #[error("container for key {key} declares {declared} members but holds {actual}")]
    CardinalityMismatch { key: u16, declared: u32, actual: u32 },

    /// A run overflows the 16-bit range, overlaps its predecessor, or is missing.
    #[error("run container for key {key} has an invalid run at index {run}")]
    InvalidRun { key: u16, run: usize },

    /// The offset header disagrees with where the payload actually starts.
    #[error("offset header entry {index} says {declared}, payload starts at {actual}")]
    OffsetMismatch {
        index: usize,
        declared: u32,
        actual: usize,
    },

    /// Bytes remain after the last container payload.
    #[error("{0} trailing bytes after the last container")]
    TrailingBytes(usize),
}

/// The scoring hook could not be set up for this query.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A required parameter is absent from the parameter map.
    #[error("missing parameter [{0}]")]
    MissingParameter(&'static str),

    /// A parameter is present but unusable.
    #[error("invalid parameter [{name}]: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The `skip` parameter is not valid base64.
    #[error("skip set is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded `skip` bytes are not a valid skip set.
    #[error("skip set deserialize failed: {0}")]
    Malformed(#[from] MalformedInputError),

    /// A params file could not be read.
    #[error("cannot read params: {0}")]
    Io(#[from] std::io::Error),
}
