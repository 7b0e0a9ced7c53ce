// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The selection optimizer: approximate maximum coverage under a budget.
//!
//! Given per-sentence coverage sets, pick an ordered subset of sentences that
//! covers as much vocabulary as possible within `maxSentences`. Three
//! strategies, one per run:
//!
//! | Strategy          | Per-step choice                                   |
//! |-------------------|---------------------------------------------------|
//! | `greedy`          | Most newly covered words                          |
//! | `weighted_greedy` | `new × W_new + redundant × W_redundant`           |
//! | `beam_search`     | Best of `beamWidth` sequences `beamDepth` deep, then greedy |
//!
//! Ties always go to the lowest sentence index. Selection is strictly
//! sequential (each choice depends on everything chosen before it) so the
//! only parallelism here is scoring candidates within one beam level. For
//! fixed inputs and configuration every strategy produces the same sequence
//! on every run.

mod beam;
mod greedy;
mod state;

pub use greedy::Scoring;
pub use state::{Selection, SelectionState, SelectionStatus, UncoveredSet};

use tracing::info;

use crate::config::{Algorithm, OptimizerConfig};
use crate::contracts::check_selection_consistent;
use crate::coverage::WorkerPool;
use crate::error::Result;
use crate::progress::{CancellationToken, ProgressSink, ProgressUpdate, Stage};
use crate::types::{SentenceIndex, SentenceRecord};

/// Run the configured strategy over precomputed sentence coverage.
///
/// `vocab_size` is the number of vocabulary entries (ids `0..vocab_size`).
/// `cancel` is polled before every iteration; a cancelled run ends `Stopped`
/// with everything committed so far intact. An invalid `config` is rejected
/// before any work.
pub fn select(
    sentences: &[SentenceRecord],
    vocab_size: usize,
    config: &OptimizerConfig,
    progress: &mut dyn ProgressSink,
    cancel: Option<&CancellationToken>,
) -> Result<SelectionState> {
    config.validate()?;
    let mut run = SelectionRun {
        sentences,
        config,
        pool: WorkerPool::from_config(config),
        state: SelectionState::new(vocab_size, sentences.len()),
        progress,
        cancel,
    };

    run.state.begin();
    if !run.state.status().is_terminal() {
        match config.algorithm {
            Algorithm::Greedy => greedy::run(&mut run, Scoring::Plain),
            Algorithm::WeightedGreedy => greedy::run(&mut run, Scoring::weighted(config)),
            Algorithm::BeamSearch => {
                beam::run(&mut run);
                if !run.state.status().is_terminal() {
                    info!("continuing with greedy after beam commit");
                    greedy::run(&mut run, Scoring::Plain);
                }
            }
        }
    }

    info!(
        status = run.state.status().as_str(),
        selected = run.state.selected().len(),
        covered = run.state.words_covered(),
        total = run.state.total_words(),
        iterations = run.state.iterations(),
        "selection finished"
    );
    check_selection_consistent(&run.state, sentences, config.max_sentences);
    Ok(run.state)
}

/// Mutable context threaded through a strategy.
pub(crate) struct SelectionRun<'a> {
    sentences: &'a [SentenceRecord],
    config: &'a OptimizerConfig,
    pool: WorkerPool,
    state: SelectionState,
    progress: &'a mut dyn ProgressSink,
    cancel: Option<&'a CancellationToken>,
}

impl SelectionRun<'_> {
    fn cancelled(&self) -> bool {
        self.cancel.is_some_and(CancellationToken::is_cancelled)
    }

    fn iterations_spent(&self) -> bool {
        self.state.iterations() >= self.config.max_iterations
    }

    /// Iteration-boundary check. Moves to `Stopped` on cancellation or when
    /// the iteration cap is reached; returns true if the run must not continue.
    fn poll_stop(&mut self, stage: Stage) -> bool {
        if self.state.status().is_terminal() {
            return true;
        }
        if self.cancelled() {
            info!(iteration = self.state.iterations(), "selection cancelled");
            self.stop(stage);
            return true;
        }
        if self.iterations_spent() {
            info!(cap = self.config.max_iterations, "iteration cap reached");
            self.stop(stage);
            return true;
        }
        false
    }

    /// End the run as `Stopped` and send the final progress update.
    fn stop(&mut self, stage: Stage) {
        self.state.stop();
        self.report(stage, true);
    }

    fn commit(&mut self, sentence: SentenceIndex) -> bool {
        self.state
            .commit(&self.sentences[sentence], self.config.max_sentences)
    }

    /// Report progress on interval boundaries, or unconditionally with `force`.
    fn report(&mut self, stage: Stage, force: bool) {
        let iteration = self.state.iterations();
        if !force && iteration % self.config.progress_interval_iterations != 0 {
            return;
        }
        self.progress.report(&ProgressUpdate {
            stage,
            current_iteration: iteration,
            total_words: self.state.total_words(),
            words_covered: self.state.words_covered(),
            sentences_selected: self.state.selected().len(),
        });
    }
}
