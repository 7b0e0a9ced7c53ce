// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Beam search lookahead.
//!
//! Keeps the `beamWidth` best partial sequences and extends each by every
//! sentence that still adds coverage, `beamDepth` levels deep. The best
//! sequence found is committed to the real state, then plain greedy takes
//! over for the rest of the budget.
//!
//! Ranking within a level is by total words covered, descending, then by the
//! sentence sequence compared lexicographically, which puts lower indices
//! first on ties. Two sequences over the same set of sentences cover the same
//! words, so only the first-ranked ordering of a set survives.
//!
//! Expanding a level scores every (parent, sentence) pair; the pool spreads
//! that over sentences. Merging sorts on a total order, so the surviving
//! beam never depends on which worker finished first.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::iter;

use tracing::debug;

use super::state::UncoveredSet;
use super::SelectionRun;
use crate::progress::Stage;
use crate::types::SentenceIndex;

/// A partial sequence under consideration.
#[derive(Debug, Clone)]
struct BeamState {
    sequence: Vec<SentenceIndex>,
    uncovered: UncoveredSet,
    covered: usize,
}

/// A one-sentence extension of a beam parent.
#[derive(Debug, Clone, Copy)]
struct Child {
    parent: usize,
    sentence: SentenceIndex,
    covered: usize,
}

pub(super) fn run(run: &mut SelectionRun<'_>) {
    let budget = run
        .config
        .max_sentences
        .saturating_sub(run.state.selected().len());
    let depth = run.config.beam_depth.min(budget);
    let width = run.config.beam_width;

    let mut beam = vec![BeamState {
        sequence: Vec::new(),
        uncovered: run.state.uncovered().clone(),
        covered: run.state.words_covered(),
    }];
    let mut capped = false;

    for level in 0..depth {
        if run.cancelled() {
            debug!(level, "beam search cancelled before commit");
            run.stop(Stage::BeamSearch);
            return;
        }
        if run.iterations_spent() {
            capped = true;
            break;
        }
        run.state.count_iteration();

        let children = expand(run, &beam);
        if children.is_empty() {
            debug!(level, "beam cannot be extended");
            break;
        }
        beam = prune(&beam, children, width, run);
        debug!(
            level,
            states = beam.len(),
            best_covered = beam[0].covered,
            "beam level complete"
        );
        run.report(Stage::BeamSearch, false);
    }

    let best = &beam[0];
    debug!(sequence = ?best.sequence, covered = best.covered, "committing best beam sequence");
    for &sentence in &best.sequence {
        if run.state.status().is_terminal() {
            break;
        }
        // Zero-gain steps are skipped; the commit re-derives coverage from
        // the real uncovered set.
        run.commit(sentence);
    }

    if capped && !run.state.status().is_terminal() {
        run.state.stop();
    }
    let done = run.state.status().is_terminal();
    run.report(Stage::BeamSearch, done);
}

/// Every extension of every beam state that adds coverage.
fn expand(run: &SelectionRun<'_>, beam: &[BeamState]) -> Vec<Child> {
    let state = &run.state;
    let per_sentence = run.pool.map_ordered(run.sentences, |_, record| {
        if state.is_selected(record.index) {
            return Vec::new();
        }
        beam.iter()
            .enumerate()
            .filter(|(_, parent)| !parent.sequence.contains(&record.index))
            .filter_map(|(p, parent)| {
                let gain = parent.uncovered.count_new(&record.coverage);
                (gain > 0).then_some(Child {
                    parent: p,
                    sentence: record.index,
                    covered: parent.covered + gain,
                })
            })
            .collect::<Vec<_>>()
    });
    per_sentence.into_iter().flatten().collect()
}

/// Rank children, drop reorderings of the same set, keep the top `width`.
fn prune(
    beam: &[BeamState],
    mut children: Vec<Child>,
    width: usize,
    run: &SelectionRun<'_>,
) -> Vec<BeamState> {
    let sequence = |c: &Child| {
        beam[c.parent]
            .sequence
            .iter()
            .copied()
            .chain(iter::once(c.sentence))
    };
    children.sort_by(|a, b| match b.covered.cmp(&a.covered) {
        Ordering::Equal => sequence(a).cmp(sequence(b)),
        other => other,
    });

    let mut seen: HashSet<Vec<SentenceIndex>> = HashSet::new();
    let mut next = Vec::with_capacity(width);
    for child in children {
        let mut key: Vec<SentenceIndex> = sequence(&child).collect();
        key.sort_unstable();
        if !seen.insert(key) {
            continue;
        }
        let parent = &beam[child.parent];
        let mut uncovered = parent.uncovered.clone();
        uncovered.cover(&run.sentences[child.sentence].coverage);
        next.push(BeamState {
            sequence: sequence(&child).collect(),
            uncovered,
            covered: child.covered,
        });
        if next.len() == width {
            break;
        }
    }
    next
}
