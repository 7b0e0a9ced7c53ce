// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Content-addressed cache for preprocessed vocabulary.
//!
//! Preprocessing a few thousand entries through a real lemmatizer takes long
//! enough that re-running it on every optimization is wasteful. The cache key
//! is a SHA-256 over the whole ordered list of primary forms, so invalidation
//! is whole-list: change one word and the entire entry misses. There is no
//! partial reuse, on purpose; ids are positions, and a partial hit would hand
//! out stale ids.
//!
//! Three backing stores:
//!
//! | Store         | Lifetime          | Notes                                 |
//! |---------------|-------------------|---------------------------------------|
//! | `NoCache`     | none              | Always misses                         |
//! | `MemoryCache` | process           | `RwLock<HashMap>`                     |
//! | `DiskCache`   | across runs       | One file per key, CRC32-checked body  |
//!
//! The cache is an optimization only. Callers log and ignore its errors.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use crate::error::{CoverError, Result};
use crate::types::{VocabularyEntry, VocabularyItem};

/// Hex-encoded SHA-256 identifying one vocabulary snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for an ordered vocabulary list.
    ///
    /// Each form is length-prefixed so `["ab", "c"]` and `["a", "bc"]` hash
    /// differently. `namespace` separates normalizers that would produce
    /// different entries for the same list.
    pub fn for_vocabulary(items: &[VocabularyItem], namespace: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update((namespace.len() as u64).to_le_bytes());
        hasher.update(namespace.as_bytes());
        hasher.update((items.len() as u64).to_le_bytes());
        for item in items {
            hasher.update((item.primary_form.len() as u64).to_le_bytes());
            hasher.update(item.primary_form.as_bytes());
        }
        CacheKey(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is plenty for logs.
        f.write_str(&self.0[..self.0.len().min(12)])
    }
}

/// Pluggable backing store for preprocessed vocabulary.
pub trait VocabularyCache: Send + Sync {
    fn load(&self, key: &CacheKey) -> Result<Option<Vec<VocabularyEntry>>>;
    fn store(&self, key: &CacheKey, entries: &[VocabularyEntry]) -> Result<()>;
}

/// Cache that never hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl VocabularyCache for NoCache {
    fn load(&self, _key: &CacheKey) -> Result<Option<Vec<VocabularyEntry>>> {
        Ok(None)
    }

    fn store(&self, _key: &CacheKey, _entries: &[VocabularyEntry]) -> Result<()> {
        Ok(())
    }
}

/// In-process cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<CacheKey, Vec<VocabularyEntry>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl VocabularyCache for MemoryCache {
    fn load(&self, key: &CacheKey) -> Result<Option<Vec<VocabularyEntry>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn store(&self, key: &CacheKey, entries: &[VocabularyEntry]) -> Result<()> {
        self.entries.write().insert(key.clone(), entries.to_vec());
        Ok(())
    }
}

/// Magic first line of a cache file. Bump the version when the entry schema changes.
const DISK_MAGIC: &str = "lexcover-vocab-cache v1";

/// One file per key under a directory.
///
/// File layout:
///
/// ```text
/// lexcover-vocab-cache v1 <crc32 hex>\n
/// <JSON array of VocabularyEntry>
/// ```
///
/// A file whose header or checksum doesn't match is reported as a cache error
/// (callers treat that as a miss) and gets overwritten on the next store.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl VocabularyCache for DiskCache {
    fn load(&self, key: &CacheKey) -> Result<Option<Vec<VocabularyEntry>>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let (header, body) = content
            .split_once('\n')
            .ok_or_else(|| CoverError::Cache(format!("{}: missing header", path.display())))?;

        let expected = header
            .strip_prefix(DISK_MAGIC)
            .map(str::trim)
            .and_then(|crc| u32::from_str_radix(crc, 16).ok())
            .ok_or_else(|| CoverError::Cache(format!("{}: bad header", path.display())))?;

        let actual = crc32fast::hash(body.as_bytes());
        if actual != expected {
            return Err(CoverError::Cache(format!(
                "{}: checksum mismatch (expected {:08x}, got {:08x})",
                path.display(),
                expected,
                actual
            )));
        }

        Ok(Some(serde_json::from_str(body)?))
    }

    fn store(&self, key: &CacheKey, entries: &[VocabularyEntry]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let body = serde_json::to_string(entries)?;
        let crc = crc32fast::hash(body.as_bytes());
        let content = format!("{} {:08x}\n{}", DISK_MAGIC, crc, body);

        // Write-then-rename so a crashed run never leaves a torn file behind.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}
