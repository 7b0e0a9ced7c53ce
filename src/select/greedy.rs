// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Greedy and weighted-greedy selection.
//!
//! Both pick, at every step, the unselected sentence with the best score;
//! they differ only in the score. If the winner adds no new words the run is
//! `Exhausted`, even when a lower-scoring sentence would still add some.
//! Plain greedy carries the usual `1 - 1/e` guarantee for maximum coverage.
//!
//! # Lazy evaluation
//!
//! Re-scoring every sentence at every step is `O(corpus × coverage)` per
//! iteration. As the uncovered set shrinks a sentence's score can only go
//! down (for plain greedy, and for weighted greedy when `W_new ≥ W_redundant`,
//! since every id moving from new to redundant changes the score by
//! `W_redundant - W_new ≤ 0`). A stale score is therefore an upper bound, and
//! a max-heap of stale scores only needs to re-score until the top entry is
//! fresh. The pick is identical to a full scan, ties included:
//!
//! ```text
//! pop top ──fresh?──yes──▶ select it
//!    ▲         │
//!    │         no: re-score, push back
//!    └─────────┘
//! ```
//!
//! With `W_redundant > W_new` scores can rise as coverage grows, the bound
//! breaks, and the loop falls back to scanning.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::state::SelectionState;
use super::SelectionRun;
use crate::config::OptimizerConfig;
use crate::progress::Stage;
use crate::types::{SentenceIndex, SentenceRecord};

/// How a candidate sentence is scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scoring {
    /// Number of newly covered ids.
    Plain,
    /// `new × new_weight + redundant × redundancy_weight`.
    Weighted {
        new_weight: f64,
        redundancy_weight: f64,
    },
}

impl Scoring {
    pub fn weighted(config: &OptimizerConfig) -> Self {
        Scoring::Weighted {
            new_weight: config.new_word_weight,
            redundancy_weight: config.redundancy_weight,
        }
    }

    /// Score a sentence covering `total` ids, `new` of them still uncovered.
    pub fn score(&self, new: usize, total: usize) -> f64 {
        match *self {
            Scoring::Plain => new as f64,
            Scoring::Weighted {
                new_weight,
                redundancy_weight,
            } => new as f64 * new_weight + total.saturating_sub(new) as f64 * redundancy_weight,
        }
    }

    /// Whether scores are non-increasing as coverage grows.
    pub fn supports_lazy(&self) -> bool {
        match *self {
            Scoring::Plain => true,
            Scoring::Weighted {
                new_weight,
                redundancy_weight,
            } => new_weight >= redundancy_weight,
        }
    }

    fn stage(&self) -> Stage {
        match self {
            Scoring::Plain => Stage::Greedy,
            Scoring::Weighted { .. } => Stage::WeightedGreedy,
        }
    }
}

pub(super) fn run(run: &mut SelectionRun<'_>, scoring: Scoring) {
    let stage = scoring.stage();
    let mut queue = scoring
        .supports_lazy()
        .then(|| LazyQueue::seed(run.sentences, &run.state, scoring));

    while !run.poll_stop(stage) {
        run.state.count_iteration();
        let pick = match queue.as_mut() {
            Some(queue) => queue.pop_best(run.sentences, &run.state, scoring),
            None => scan_best(run.sentences, &run.state, scoring),
        };
        match pick.filter(|&i| adds_coverage(run.sentences, &run.state, i)) {
            Some(sentence) => {
                run.commit(sentence);
            }
            None => run.state.exhaust(),
        }
        let done = run.state.status().is_terminal();
        run.report(stage, done);
    }
}

fn adds_coverage(
    sentences: &[SentenceRecord],
    state: &SelectionState,
    index: SentenceIndex,
) -> bool {
    state.uncovered().count_new(&sentences[index].coverage) > 0
}

/// Best-scoring unselected sentence, lowest index on ties. `None` only when
/// every sentence is selected.
pub(super) fn scan_best(
    sentences: &[SentenceRecord],
    state: &SelectionState,
    scoring: Scoring,
) -> Option<SentenceIndex> {
    let mut best: Option<(f64, SentenceIndex)> = None;
    for sentence in sentences {
        if state.is_selected(sentence.index) {
            continue;
        }
        let new = state.uncovered().count_new(&sentence.coverage);
        let score = scoring.score(new, sentence.coverage.len());
        if best.map_or(true, |(top, _)| score > top) {
            best = Some((score, sentence.index));
        }
    }
    best.map(|(_, index)| index)
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    score: f64,
    index: SentenceIndex,
    /// `selected().len()` when `score` was computed.
    stamp: usize,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher score first, then lower index.
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

struct LazyQueue {
    heap: BinaryHeap<Candidate>,
}

impl LazyQueue {
    fn seed(sentences: &[SentenceRecord], state: &SelectionState, scoring: Scoring) -> Self {
        let stamp = state.selected().len();
        let heap = sentences
            .iter()
            .filter(|s| !state.is_selected(s.index))
            .map(|s| Candidate {
                score: scoring.score(state.uncovered().count_new(&s.coverage), s.coverage.len()),
                index: s.index,
                stamp,
            })
            .collect();
        Self { heap }
    }

    fn pop_best(
        &mut self,
        sentences: &[SentenceRecord],
        state: &SelectionState,
        scoring: Scoring,
    ) -> Option<SentenceIndex> {
        let stamp = state.selected().len();
        while let Some(top) = self.heap.pop() {
            if top.stamp == stamp {
                return Some(top.index);
            }
            let sentence = &sentences[top.index];
            let new = state.uncovered().count_new(&sentence.coverage);
            self.heap.push(Candidate {
                score: scoring.score(new, sentence.coverage.len()),
                index: top.index,
                stamp,
            });
        }
        None
    }
}
