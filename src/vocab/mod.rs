// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Vocabulary preprocessing and its cache.

pub mod cache;
pub mod preprocess;

pub use cache::{CacheKey, DiskCache, MemoryCache, NoCache, VocabularyCache};
pub use preprocess::{preprocess_entry, preprocess_vocabulary, split_variants};
