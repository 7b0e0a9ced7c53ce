// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sentence coverage: which vocabulary ids each corpus sentence satisfies.
//!
//! Each sentence is normalized once with the same service used for the
//! vocabulary, queried against the matching index, and its coverage set is
//! stored on a [`SentenceRecord`]. Coverage is computed exactly once per run
//! and shared by every selection strategy.
//!
//! A sentence the normalizer rejects contributes no coverage. One malformed
//! record in a corpus of fifty thousand shouldn't sink the run.

pub mod parallel;

pub use parallel::WorkerPool;

use tracing::{info, warn};

use crate::error::NormalizeError;
use crate::index::MatchingIndex;
use crate::normalize::Normalizer;
use crate::progress::{ProgressSink, ProgressUpdate, Stage};
use crate::types::{AnalyzedSentence, CoverageSet, SentenceIndex, SentenceRecord};
use crate::utils::fold_case;

/// Sequential analysis reports progress every this many sentences.
const ANALYSIS_PROGRESS_STEP: usize = 100;

/// Coverage for a whole corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusCoverage {
    /// One record per corpus sentence, in corpus order.
    pub sentences: Vec<SentenceRecord>,
    /// `coverage_map[vocab_id]` lists every sentence that covers it, ascending.
    pub coverage_map: Vec<Vec<SentenceIndex>>,
}

/// Case-fold and normalize a sentence for querying.
pub fn analyze_text<N: Normalizer + ?Sized>(
    normalizer: &N,
    text: &str,
) -> Result<AnalyzedSentence, NormalizeError> {
    let folded = fold_case(text);
    if folded.trim().is_empty() {
        return Ok(AnalyzedSentence::default());
    }
    let analysis = normalizer.normalize(&folded)?;
    Ok(AnalyzedSentence::new(folded, analysis))
}

/// Coverage set of one sentence. Normalizer errors yield an empty set.
pub fn sentence_coverage<N: Normalizer + ?Sized>(
    index: &MatchingIndex,
    normalizer: &N,
    text: &str,
) -> CoverageSet {
    match analyze_text(normalizer, text) {
        Ok(sentence) => index.query(&sentence),
        Err(e) => {
            warn!("sentence skipped, no coverage recorded: {}", e);
            CoverageSet::new()
        }
    }
}

/// Compute coverage for every sentence of `corpus`.
///
/// Large corpora are spread over `pool`; results come back in corpus order
/// either way, so the output is identical with and without parallelism.
pub fn compute_coverage<N: Normalizer + ?Sized>(
    index: &MatchingIndex,
    normalizer: &N,
    corpus: &[String],
    pool: &WorkerPool,
    progress: &mut dyn ProgressSink,
) -> CorpusCoverage {
    let total_words = index.entry_count();
    let update = |done: usize| ProgressUpdate {
        stage: Stage::Analyzing,
        current_iteration: done,
        total_words,
        words_covered: 0,
        sentences_selected: 0,
    };
    progress.report(&update(0));

    let coverages: Vec<CoverageSet> = if pool.will_parallelize(corpus.len()) {
        info!(
            sentences = corpus.len(),
            workers = pool.workers(),
            "analyzing sentences in parallel"
        );
        pool.map_ordered(corpus, |_, text| sentence_coverage(index, normalizer, text))
    } else {
        info!(sentences = corpus.len(), "analyzing sentences");
        let mut out = Vec::with_capacity(corpus.len());
        for (i, text) in corpus.iter().enumerate() {
            out.push(sentence_coverage(index, normalizer, text));
            if (i + 1) % ANALYSIS_PROGRESS_STEP == 0 {
                progress.report(&update(i + 1));
            }
        }
        out
    };

    let sentences: Vec<SentenceRecord> = corpus
        .iter()
        .zip(coverages)
        .enumerate()
        .map(|(index, (text, coverage))| SentenceRecord {
            index,
            text: text.clone(),
            coverage,
        })
        .collect();

    let coverage_map = build_coverage_map(&sentences, total_words);
    progress.report(&update(corpus.len()));

    CorpusCoverage {
        sentences,
        coverage_map,
    }
}

/// Invert sentence coverage into `vocab_id → [sentence_index]`.
pub fn build_coverage_map(
    sentences: &[SentenceRecord],
    vocab_size: usize,
) -> Vec<Vec<SentenceIndex>> {
    let mut map = vec![Vec::new(); vocab_size];
    for sentence in sentences {
        for &id in &sentence.coverage {
            if let Some(list) = map.get_mut(id) {
                list.push(sentence.index);
            }
        }
    }
    map
}
