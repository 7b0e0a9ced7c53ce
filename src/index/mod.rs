// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The matching index: reverse lookups from sentence features to vocabulary ids.
//!
//! Three channels, unioned per query:
//! - **Phrase**: word-boundary containment of a multi-word variant
//! - **Token**: exact surface-form membership (`chat` in "mon chat")
//! - **Lemma**: dictionary-form membership (`être` via "suis"), optional
//!
//! An entry flagged as a phrase is matched by containment only, across all of
//! its variants. Its individual words never go into the token or lemma maps,
//! otherwise `"le monde"` would match any sentence containing `"le"`.
//!
//! Query cost is proportional to the sentence (its tokens, lemmas and word
//! runs), not to the vocabulary. The index is built once and only read after.

mod explain;
mod phrase;

pub use explain::{MatchChannel, MatchDetail};
pub use phrase::{PhraseMatcher, PhrasePattern};

use std::collections::{BTreeSet, HashMap};

use tracing::info;

use crate::contracts::check_phrase_entries_isolated;
use crate::types::{AnalyzedSentence, CoverageSet, VocabId, VocabularyEntry};
use crate::utils::fold_case;

/// Reverse lookup structures built from preprocessed vocabulary.
#[derive(Debug, Clone, Default)]
pub struct MatchingIndex {
    lemma_to_ids: HashMap<String, Vec<VocabId>>,
    token_to_ids: HashMap<String, Vec<VocabId>>,
    phrases: PhraseMatcher,
    lemma_matching: bool,
    entry_count: usize,
}

/// Insert `id` into the posting for `key`, keeping postings sorted and unique.
fn add_posting(map: &mut HashMap<String, Vec<VocabId>>, key: &str, id: VocabId) {
    let ids = map.entry(key.to_string()).or_default();
    if let Err(pos) = ids.binary_search(&id) {
        ids.insert(pos, id);
    }
}

impl MatchingIndex {
    /// Build the index. `lemma_matching` switches the lemma channel on or off
    /// for every query against this index.
    pub fn build(entries: &[VocabularyEntry], lemma_matching: bool) -> Self {
        let mut index = MatchingIndex {
            lemma_matching,
            entry_count: entries.len(),
            ..Default::default()
        };

        for entry in entries {
            if entry.is_phrase {
                for variant in &entry.variants {
                    index.phrases.push(fold_case(variant), entry.id);
                }
                continue;
            }
            for token in &entry.match_tokens {
                add_posting(&mut index.token_to_ids, token, entry.id);
            }
            for lemma in &entry.match_lemmas {
                add_posting(&mut index.lemma_to_ids, lemma, entry.id);
            }
        }

        let (tokens, lemmas) = index.key_counts();
        info!(
            lemmas,
            tokens,
            phrases = index.phrases.len(),
            "built lookup tables"
        );
        check_phrase_entries_isolated(&index, entries);
        index
    }

    /// Vocabulary ids satisfied by `sentence` through any enabled channel.
    pub fn query(&self, sentence: &AnalyzedSentence) -> CoverageSet {
        let mut found = CoverageSet::new();

        self.phrases.collect_matches(&sentence.text, &mut found);

        for token in &sentence.tokens {
            if let Some(ids) = self.token_to_ids.get(token) {
                found.extend(ids.iter().copied());
            }
        }

        if self.lemma_matching {
            for lemma in &sentence.lemmas {
                if let Some(ids) = self.lemma_to_ids.get(lemma) {
                    found.extend(ids.iter().copied());
                }
            }
        }

        found
    }

    pub fn lemma_matching(&self) -> bool {
        self.lemma_matching
    }

    /// Number of vocabulary entries the index was built from.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn phrase_patterns(&self) -> &[PhrasePattern] {
        self.phrases.patterns()
    }

    pub fn ids_for_token(&self, token: &str) -> &[VocabId] {
        self.token_to_ids.get(token).map_or(&[], Vec::as_slice)
    }

    pub fn ids_for_lemma(&self, lemma: &str) -> &[VocabId] {
        self.lemma_to_ids.get(lemma).map_or(&[], Vec::as_slice)
    }

    /// Distinct token and lemma keys (for diagnostics).
    pub fn key_counts(&self) -> (usize, usize) {
        (self.token_to_ids.len(), self.lemma_to_ids.len())
    }

    /// Every vocabulary id reachable from at least one key or pattern.
    pub fn reachable_ids(&self) -> BTreeSet<VocabId> {
        self.token_to_ids
            .values()
            .chain(self.lemma_to_ids.values())
            .flatten()
            .copied()
            .chain(self.phrases.patterns().iter().map(|p| p.vocab_id))
            .collect()
    }
}
