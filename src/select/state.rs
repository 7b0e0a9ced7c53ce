// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Selection state and its transitions.
//!
//! ```text
//! Initializing ──begin──▶ Selecting ──┬──▶ Complete   (nothing left uncovered)
//!      │                     ▲   │    ├──▶ Stopped    (budget, iteration cap, cancel)
//!      │                     └───┘    └──▶ Exhausted  (no sentence adds coverage)
//!      └──begin (empty vocabulary)──▶ Complete
//! ```
//!
//! All three end states are terminal. The uncovered set only ever shrinks, a
//! sentence is selected at most once, and every transition happens between
//! iterations, never halfway through applying a selection.

use serde::Serialize;

use crate::types::{CoverageSet, SentenceIndex, SentenceRecord, VocabId};

/// Where a selection run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    Initializing,
    Selecting,
    Complete,
    Stopped,
    Exhausted,
}

impl SelectionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SelectionStatus::Complete | SelectionStatus::Stopped | SelectionStatus::Exhausted
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionStatus::Initializing => "initializing",
            SelectionStatus::Selecting => "selecting",
            SelectionStatus::Complete => "complete",
            SelectionStatus::Stopped => "stopped",
            SelectionStatus::Exhausted => "exhausted",
        }
    }
}

/// One committed selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub sentence_index: SentenceIndex,
    /// Ids this sentence covered for the first time, ascending.
    pub newly_covered: Vec<VocabId>,
    /// Size of the sentence's full coverage set.
    pub total_coverage: usize,
}

/// Dense set of still-uncovered vocabulary ids.
///
/// A flag vector instead of a hash set: `count_new` is the hot loop of every
/// strategy and this keeps it to one indexed load per covered id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncoveredSet {
    flags: Vec<bool>,
    remaining: usize,
}

impl UncoveredSet {
    /// Every id in `0..size` uncovered.
    pub fn full(size: usize) -> Self {
        Self {
            flags: vec![true; size],
            remaining: size,
        }
    }

    pub fn contains(&self, id: VocabId) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// `|coverage ∩ uncovered|`
    pub fn count_new(&self, coverage: &CoverageSet) -> usize {
        coverage.iter().filter(|&&id| self.contains(id)).count()
    }

    /// `coverage ∩ uncovered`, ascending.
    pub fn new_in(&self, coverage: &CoverageSet) -> Vec<VocabId> {
        coverage
            .iter()
            .copied()
            .filter(|&id| self.contains(id))
            .collect()
    }

    /// Mark every id in `coverage` as covered.
    pub fn cover(&mut self, coverage: &CoverageSet) {
        for &id in coverage {
            if let Some(flag) = self.flags.get_mut(id) {
                if *flag {
                    *flag = false;
                    self.remaining -= 1;
                }
            }
        }
    }

    /// Uncovered ids, ascending.
    pub fn ids(&self) -> Vec<VocabId> {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(id, &flag)| flag.then_some(id))
            .collect()
    }
}

/// Everything the optimizer knows about a run in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    selected: Vec<Selection>,
    uncovered: UncoveredSet,
    status: SelectionStatus,
    iterations: usize,
    chosen: Vec<bool>,
}

impl SelectionState {
    pub fn new(vocab_size: usize, corpus_size: usize) -> Self {
        Self {
            selected: Vec::new(),
            uncovered: UncoveredSet::full(vocab_size),
            status: SelectionStatus::Initializing,
            iterations: 0,
            chosen: vec![false; corpus_size],
        }
    }

    /// Leave `Initializing`. With nothing to cover the run is already complete.
    pub fn begin(&mut self) {
        debug_assert_eq!(self.status, SelectionStatus::Initializing);
        self.status = if self.uncovered.is_empty() {
            SelectionStatus::Complete
        } else {
            SelectionStatus::Selecting
        };
    }

    pub fn status(&self) -> SelectionStatus {
        self.status
    }

    pub fn selected(&self) -> &[Selection] {
        &self.selected
    }

    pub fn uncovered(&self) -> &UncoveredSet {
        &self.uncovered
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn total_words(&self) -> usize {
        self.uncovered.flags.len()
    }

    pub fn words_covered(&self) -> usize {
        self.total_words() - self.uncovered.len()
    }

    pub fn is_selected(&self, sentence: SentenceIndex) -> bool {
        self.chosen.get(sentence).copied().unwrap_or(false)
    }

    pub(crate) fn count_iteration(&mut self) {
        self.iterations += 1;
    }

    /// Append `sentence` if it adds coverage.
    ///
    /// Returns `false` (and changes nothing) when the sentence is already
    /// selected or covers nothing new. After appending, the state moves to
    /// `Complete` if nothing is left uncovered, else to `Stopped` if the
    /// budget is spent.
    pub(crate) fn commit(&mut self, sentence: &SentenceRecord, max_sentences: usize) -> bool {
        debug_assert_eq!(self.status, SelectionStatus::Selecting);
        if self.is_selected(sentence.index) {
            return false;
        }
        let newly_covered = self.uncovered.new_in(&sentence.coverage);
        if newly_covered.is_empty() {
            return false;
        }

        self.uncovered.cover(&sentence.coverage);
        self.chosen[sentence.index] = true;
        self.selected.push(Selection {
            sentence_index: sentence.index,
            newly_covered,
            total_coverage: sentence.coverage.len(),
        });

        if self.uncovered.is_empty() {
            self.status = SelectionStatus::Complete;
        } else if self.selected.len() >= max_sentences {
            self.status = SelectionStatus::Stopped;
        }
        true
    }

    /// No remaining sentence adds coverage.
    pub(crate) fn exhaust(&mut self) {
        debug_assert_eq!(self.status, SelectionStatus::Selecting);
        self.status = SelectionStatus::Exhausted;
    }

    /// Budget, iteration cap or cancellation.
    pub(crate) fn stop(&mut self) {
        debug_assert!(!self.status.is_terminal());
        self.status = SelectionStatus::Stopped;
    }
}
