// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word-boundary-anchored phrase containment.
//!
//! A phrase pattern matches when it occurs in the case-folded sentence with a
//! word boundary at both ends: `"le monde"` matches `"le monde est beau"` but
//! not `"le grand monde"` or `"le mondeux"`.
//!
//! Testing every pattern against every sentence is O(patterns) per sentence,
//! which is the slow part for a large phrase list. Instead each pattern is
//! filed under its *anchor*, the leading run of word characters (`"le"` for
//! `"le monde"`). A bounded match starting at a boundary must begin with the
//! same word run in the sentence, because the run ends at a non-word character
//! inside the pattern (or at the pattern's own end, which the trailing boundary
//! check pins). So for a sentence we only verify patterns whose anchor is one
//! of the sentence's word runs. Patterns that start with punctuation have no
//! anchor and are always verified.

use std::collections::HashMap;

use crate::types::{CoverageSet, VocabId};
use crate::utils::{find_bounded, is_word_char, word_runs};

/// One compiled phrase: case-folded pattern text and the entry it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhrasePattern {
    pub pattern: String,
    pub vocab_id: VocabId,
}

/// Ordered phrase patterns plus the anchor lookup.
#[derive(Debug, Clone, Default)]
pub struct PhraseMatcher {
    patterns: Vec<PhrasePattern>,
    by_anchor: HashMap<String, Vec<usize>>,
    unanchored: Vec<usize>,
}

impl PhraseMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pattern. `pattern` must already be case-folded.
    pub fn push(&mut self, pattern: String, vocab_id: VocabId) {
        if pattern.is_empty() {
            return;
        }
        let slot = self.patterns.len();
        match anchor_of(&pattern) {
            Some(anchor) => self
                .by_anchor
                .entry(anchor.to_string())
                .or_default()
                .push(slot),
            None => self.unanchored.push(slot),
        }
        self.patterns.push(PhrasePattern { pattern, vocab_id });
    }

    pub fn patterns(&self) -> &[PhrasePattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Add the ids of every pattern contained in `text` to `out`.
    pub fn collect_matches(&self, text: &str, out: &mut CoverageSet) {
        if self.patterns.is_empty() {
            return;
        }

        let mut candidates: Vec<usize> = self.unanchored.clone();
        for run in word_runs(text) {
            if let Some(slots) = self.by_anchor.get(run) {
                candidates.extend_from_slice(slots);
            }
        }
        candidates.sort_unstable();
        candidates.dedup();

        for slot in candidates {
            let phrase = &self.patterns[slot];
            if out.contains(&phrase.vocab_id) {
                continue;
            }
            if find_bounded(text, &phrase.pattern).is_some() {
                out.insert(phrase.vocab_id);
            }
        }
    }
}

/// Leading word run of a pattern, or `None` if it starts with a non-word char.
fn anchor_of(pattern: &str) -> Option<&str> {
    let end = pattern
        .char_indices()
        .find(|(_, c)| !is_word_char(*c))
        .map_or(pattern.len(), |(i, _)| i);
    (end > 0).then(|| &pattern[..end])
}
