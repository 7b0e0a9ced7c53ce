// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-run progress reporting and cooperative cancellation.
//!
//! Both are owned by the caller and passed into a run, never global, so two
//! optimizations running side by side can't see each other's progress.
//! Progress is observational: a sink can't influence what gets selected.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

/// Which phase of the pipeline a progress update comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Analyzing,
    Greedy,
    WeightedGreedy,
    BeamSearch,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Analyzing => "Analyzing sentences",
            Stage::Greedy => "Optimizing (greedy)",
            Stage::WeightedGreedy => "Optimizing (weighted greedy)",
            Stage::BeamSearch => "Optimizing (beam search)",
        }
    }
}

/// Snapshot handed to a [`ProgressSink`].
///
/// During [`Stage::Analyzing`], `current_iteration` counts sentences analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub stage: Stage,
    pub current_iteration: usize,
    pub total_words: usize,
    pub words_covered: usize,
    pub sentences_selected: usize,
}

/// Receives progress updates. Any `FnMut(&ProgressUpdate)` closure is a sink.
pub trait ProgressSink {
    fn report(&mut self, update: &ProgressUpdate);
}

impl<F: FnMut(&ProgressUpdate)> ProgressSink for F {
    fn report(&mut self, update: &ProgressUpdate) {
        self(update)
    }
}

/// Sink that drops every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _update: &ProgressUpdate) {}
}

/// Cloneable cancellation flag, polled between selection iterations.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
