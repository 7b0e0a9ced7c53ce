// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! End-to-end pipeline: vocabulary in, report out.
//!
//! ```text
//! items ──preprocess──▶ entries ──build──▶ MatchingIndex
//!                                               │
//! corpus ─────────────── compute_coverage ◀─────┘
//!                               │
//!                            select ──▶ assemble ──▶ OptimizationReport
//! ```
//!
//! Configuration and normalizer failures surface as errors before any
//! selection happens. Everything after preprocessing is infallible: bad
//! sentences contribute no coverage, and running out of useful sentences is
//! a terminal state, not an error.

use std::time::Instant;

use tracing::info;

use crate::config::OptimizerConfig;
use crate::coverage::{compute_coverage, CorpusCoverage, WorkerPool};
use crate::error::Result;
use crate::index::MatchingIndex;
use crate::normalize::Normalizer;
use crate::progress::{CancellationToken, ProgressSink};
use crate::report::{assemble, OptimizationReport};
use crate::select::select;
use crate::types::{VocabularyEntry, VocabularyItem};
use crate::vocab::{preprocess_vocabulary, MemoryCache, NoCache, VocabularyCache};

/// A validated configuration bound to a normalizer and a vocabulary cache.
pub struct Optimizer<N: Normalizer> {
    config: OptimizerConfig,
    normalizer: N,
    cache: Box<dyn VocabularyCache>,
}

impl<N: Normalizer> Optimizer<N> {
    /// Validate `config` and set up an in-memory vocabulary cache.
    pub fn new(config: OptimizerConfig, normalizer: N) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            normalizer,
            cache: Box::new(MemoryCache::new()),
        })
    }

    /// Replace the vocabulary cache (for example with a `DiskCache`).
    pub fn with_cache(mut self, cache: Box<dyn VocabularyCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &N {
        &self.normalizer
    }

    fn active_cache(&self) -> &dyn VocabularyCache {
        if self.config.cache_enabled {
            self.cache.as_ref()
        } else {
            &NoCache
        }
    }

    /// Preprocess `items` and build the matching index.
    pub fn prepare(&self, items: &[VocabularyItem]) -> Result<(Vec<VocabularyEntry>, MatchingIndex)> {
        let entries = preprocess_vocabulary(items, &self.normalizer, self.active_cache())?;
        let index = MatchingIndex::build(&entries, self.config.lemma_channel_enabled());
        Ok((entries, index))
    }

    /// Coverage of every corpus sentence against a prepared index.
    pub fn analyze(
        &self,
        index: &MatchingIndex,
        corpus: &[String],
        progress: &mut dyn ProgressSink,
    ) -> CorpusCoverage {
        let pool = WorkerPool::from_config(&self.config);
        compute_coverage(index, &self.normalizer, corpus, &pool, progress)
    }

    /// Run the full pipeline.
    pub fn run(
        &self,
        items: &[VocabularyItem],
        corpus: &[String],
        progress: &mut dyn ProgressSink,
        cancel: Option<&CancellationToken>,
    ) -> Result<OptimizationReport> {
        let start = Instant::now();
        info!(
            algorithm = %self.config.algorithm,
            vocabulary = items.len(),
            sentences = corpus.len(),
            max_sentences = self.config.max_sentences,
            "starting optimization"
        );

        let (entries, index) = self.prepare(items)?;
        let coverage = self.analyze(&index, corpus, progress);
        let state = select(
            &coverage.sentences,
            entries.len(),
            &self.config,
            progress,
            cancel,
        )?;

        let report = assemble(
            items,
            &coverage,
            &state,
            &self.config,
            start.elapsed().as_secs_f64(),
        );
        info!(
            status = report.summary.status.as_str(),
            coverage = report.summary.coverage_percent,
            selected = report.summary.sentences_selected,
            "optimization finished"
        );
        Ok(report)
    }
}
