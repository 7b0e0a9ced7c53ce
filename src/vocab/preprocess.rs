// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Expand raw vocabulary items into matchable entries.
//!
//! Each item's primary form is split on `|` into variants (gender and number
//! forms are usually written `un|une`, `beau|belle`), every variant is run
//! through the normalizer, and the resulting tokens and lemmas are unioned.
//! The entry id is the item's position in the list and is never reassigned.
//!
//! Preprocessing is all-or-nothing: if the normalizer fails on any variant the
//! whole call fails with `DependencyUnavailable` and no entries are returned.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::cache::{CacheKey, VocabularyCache};
use crate::error::Result;
use crate::normalize::Normalizer;
use crate::types::{VocabId, VocabularyEntry, VocabularyItem};
use crate::utils::fold_case;

/// Split a primary form on `|`, trimming each piece and dropping empty ones.
pub fn split_variants(primary_form: &str) -> Vec<String> {
    primary_form
        .split('|')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Preprocess a single item.
pub fn preprocess_entry<N: Normalizer + ?Sized>(
    id: VocabId,
    item: &VocabularyItem,
    normalizer: &N,
) -> Result<VocabularyEntry> {
    let variants = split_variants(&item.primary_form);
    let is_phrase = variants
        .iter()
        .any(|v| v.split_whitespace().nth(1).is_some());

    let mut match_tokens = BTreeSet::new();
    let mut match_lemmas = BTreeSet::new();
    for variant in &variants {
        for pair in normalizer.normalize(&fold_case(variant))? {
            match_tokens.insert(pair.token);
            match_lemmas.insert(pair.lemma);
        }
    }

    Ok(VocabularyEntry {
        id,
        canonical_text: item.primary_form.clone(),
        variants,
        is_phrase,
        match_tokens,
        match_lemmas,
    })
}

/// Preprocess a whole vocabulary list, consulting `cache` first.
///
/// The cache is keyed on the full ordered list of primary forms plus the
/// normalizer fingerprint, so any edit anywhere in the list is a miss for the
/// whole list. Cache failures are logged and otherwise ignored.
pub fn preprocess_vocabulary<N: Normalizer + ?Sized>(
    items: &[VocabularyItem],
    normalizer: &N,
    cache: &dyn VocabularyCache,
) -> Result<Vec<VocabularyEntry>> {
    let key = CacheKey::for_vocabulary(items, &normalizer.fingerprint());

    match cache.load(&key) {
        Ok(Some(entries)) if cached_entries_match(&entries, items) => {
            info!(entries = entries.len(), key = %key, "loaded preprocessed vocabulary from cache");
            return Ok(entries);
        }
        Ok(Some(_)) => warn!(key = %key, "cached vocabulary does not match input, rebuilding"),
        Ok(None) => debug!(key = %key, "vocabulary cache miss"),
        Err(e) => warn!(key = %key, "vocabulary cache unreadable: {}", e),
    }

    let mut entries = Vec::with_capacity(items.len());
    for (id, item) in items.iter().enumerate() {
        entries.push(preprocess_entry(id, item, normalizer)?);
        if (id + 1) % 500 == 0 {
            debug!("preprocessed {}/{} vocabulary items", id + 1, items.len());
        }
    }
    info!(entries = entries.len(), "preprocessed vocabulary");

    if let Err(e) = cache.store(&key, &entries) {
        warn!(key = %key, "failed to store vocabulary cache: {}", e);
    }

    Ok(entries)
}

/// Guard against a cache entry that was written for a different list.
fn cached_entries_match(entries: &[VocabularyEntry], items: &[VocabularyItem]) -> bool {
    entries.len() == items.len()
        && entries
            .iter()
            .zip(items)
            .enumerate()
            .all(|(id, (entry, item))| entry.id == id && entry.canonical_text == item.primary_form)
}
