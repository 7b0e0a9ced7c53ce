// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for selection and matching.
//!
//! Debug-mode assertions over the properties every run must hold. They are
//! zero-cost in release builds (`debug_assert!`) and fail early during
//! development and in tests.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function               | Property                                         |
//! |---------------------------------|--------------------------------------------------|
//! | `check_selection_consistent`    | uncovered = all ids − ⋃ coverage of selected      |
//! | `check_selection_unique`        | no sentence is selected twice                     |
//! | `check_budget_respected`        | `len(selected) ≤ maxSentences`                    |
//! | `check_new_coverage_disjoint`   | per-step new ids partition the covered ids        |
//! | `check_phrase_entries_isolated` | phrase entries only reachable as phrases          |
//!
//! # Usage
//!
//! ```ignore
//! use lexcover::contracts::*;
//!
//! // In debug builds, this panics if an invariant is violated
//! check_selection_consistent(&state, &sentences, config.max_sentences);
//! ```

use std::collections::BTreeSet;

use crate::index::MatchingIndex;
use crate::select::SelectionState;
use crate::types::{SentenceRecord, VocabId, VocabularyEntry};

// ============================================================================
// SELECTION CONTRACTS
// ============================================================================

/// Check every selection invariant at once.
///
/// # Panics (debug builds only)
/// Panics if any of the checks below fails.
#[inline]
pub fn check_selection_consistent(
    state: &SelectionState,
    sentences: &[SentenceRecord],
    max_sentences: usize,
) {
    if cfg!(debug_assertions) {
        check_selection_unique(state);
        check_budget_respected(state, max_sentences);
        check_new_coverage_disjoint(state);
        check_uncovered_matches_selection(state, sentences);
    }
}

/// Check that no sentence index appears twice in the selection.
#[inline]
pub fn check_selection_unique(state: &SelectionState) {
    let mut seen = BTreeSet::new();
    for selection in state.selected() {
        debug_assert!(
            seen.insert(selection.sentence_index),
            "Sentence {} selected twice",
            selection.sentence_index
        );
    }
}

/// Check that the selection fits the sentence budget.
#[inline]
pub fn check_budget_respected(state: &SelectionState, max_sentences: usize) {
    debug_assert!(
        state.selected().len() <= max_sentences,
        "Selected {} sentences with a budget of {}",
        state.selected().len(),
        max_sentences
    );
}

/// Check that each selection covered something new, nothing was covered
/// twice, and the new ids add up to the covered count.
#[inline]
pub fn check_new_coverage_disjoint(state: &SelectionState) {
    let mut covered: BTreeSet<VocabId> = BTreeSet::new();
    for selection in state.selected() {
        debug_assert!(
            !selection.newly_covered.is_empty(),
            "Sentence {} was selected without adding coverage",
            selection.sentence_index
        );
        for &id in &selection.newly_covered {
            debug_assert!(
                covered.insert(id),
                "Vocabulary id {} reported new twice (sentence {})",
                id,
                selection.sentence_index
            );
        }
    }
    debug_assert_eq!(
        covered.len(),
        state.words_covered(),
        "Newly covered ids do not sum to the covered count"
    );
}

/// Check that the uncovered set is exactly all ids minus the union of the
/// selected sentences' coverage.
#[inline]
pub fn check_uncovered_matches_selection(state: &SelectionState, sentences: &[SentenceRecord]) {
    let mut covered: BTreeSet<VocabId> = BTreeSet::new();
    for selection in state.selected() {
        if let Some(record) = sentences.get(selection.sentence_index) {
            covered.extend(record.coverage.iter().copied().filter(|&id| id < state.total_words()));
        }
    }
    let expected: Vec<VocabId> = (0..state.total_words())
        .filter(|id| !covered.contains(id))
        .collect();
    debug_assert_eq!(
        state.uncovered().ids(),
        expected,
        "Uncovered set diverged from the selected sentences' coverage"
    );
}

// ============================================================================
// MATCHING CONTRACTS
// ============================================================================

/// Check that phrase entries are reachable only through the phrase matcher.
///
/// # Panics (debug builds only)
/// Panics if a phrase entry's id appears under any token or lemma key, or a
/// non-phrase entry was registered as a phrase pattern.
#[inline]
pub fn check_phrase_entries_isolated(index: &MatchingIndex, entries: &[VocabularyEntry]) {
    if !cfg!(debug_assertions) {
        return;
    }
    for entry in entries {
        if entry.is_phrase {
            for token in &entry.match_tokens {
                debug_assert!(
                    !index.ids_for_token(token).contains(&entry.id),
                    "Phrase entry {} indexed under token {:?}",
                    entry.id,
                    token
                );
            }
            for lemma in &entry.match_lemmas {
                debug_assert!(
                    !index.ids_for_lemma(lemma).contains(&entry.id),
                    "Phrase entry {} indexed under lemma {:?}",
                    entry.id,
                    lemma
                );
            }
        }
    }
    for pattern in index.phrase_patterns() {
        debug_assert!(
            entries
                .get(pattern.vocab_id)
                .is_some_and(|entry| entry.is_phrase),
            "Phrase pattern {:?} points at non-phrase entry {}",
            pattern.pattern,
            pattern.vocab_id
        );
    }
}
