// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for lexcover.
//!
//! Only two kinds of failure stop a run: a bad configuration (caught before any
//! work starts) and an unavailable normalization service during vocabulary
//! preprocessing. Everything else degrades: a sentence that fails to normalize
//! contributes no coverage, a broken cache entry is a miss, and running out of
//! useful sentences is a terminal selection state rather than an error.

use thiserror::Error;

/// Top-level error type for lexcover operations.
#[derive(Debug, Error)]
pub enum CoverError {
    /// Unknown algorithm name or an out-of-range option.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The normalization service failed while preprocessing vocabulary.
    #[error("normalization service unavailable: {0}")]
    DependencyUnavailable(String),

    /// Vocabulary cache could not be read or written.
    #[error("cache error: {0}")]
    Cache(String),

    /// I/O error wrapper.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde serialization/deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for lexcover operations.
pub type Result<T> = std::result::Result<T, CoverError>;

/// Error reported by a [`Normalizer`](crate::Normalizer) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The backing model or service cannot be reached at all.
    #[error("normalizer unavailable: {0}")]
    Unavailable(String),

    /// The service is up but refused this particular input.
    #[error("normalizer rejected input {text:?}: {reason}")]
    Rejected { text: String, reason: String },
}

impl From<NormalizeError> for CoverError {
    fn from(err: NormalizeError) -> Self {
        CoverError::DependencyUnavailable(err.to_string())
    }
}
