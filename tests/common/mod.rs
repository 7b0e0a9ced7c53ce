//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::collections::BTreeSet;

use lexcover::{
    Algorithm, NoProgress, Normalizer, OptimizationReport, Optimizer, OptimizerConfig,
    SentenceRecord, SimpleNormalizer, VocabId, VocabularyItem,
};

// Re-export canonical test utilities from lexcover::testing
pub use lexcover::testing::{corpus, french_lemmas, french_sentences, french_vocabulary, make_items};

pub const ALL_ALGORITHMS: [Algorithm; 3] = [
    Algorithm::Greedy,
    Algorithm::WeightedGreedy,
    Algorithm::BeamSearch,
];

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Default configuration with `algorithm`, running on the calling thread.
pub fn sequential(algorithm: Algorithm) -> OptimizerConfig {
    OptimizerConfig {
        algorithm,
        parallel: false,
        cache_enabled: false,
        ..Default::default()
    }
}

/// Same as [`sequential`] but forcing every parallel path on.
pub fn parallel(algorithm: Algorithm) -> OptimizerConfig {
    OptimizerConfig {
        parallel: true,
        parallel_threshold: 0,
        worker_count: 4,
        ..sequential(algorithm)
    }
}

// ============================================================================
// RUNNERS
// ============================================================================

/// Run the full pipeline with the plain normalizer.
pub fn optimize(forms: &[&str], sentences: &[&str], config: OptimizerConfig) -> OptimizationReport {
    optimize_with(&make_items(forms), &corpus(sentences), config, SimpleNormalizer::new())
}

pub fn optimize_with<N: Normalizer>(
    items: &[VocabularyItem],
    sentences: &[String],
    config: OptimizerConfig,
    normalizer: N,
) -> OptimizationReport {
    Optimizer::new(config, normalizer)
        .expect("valid config")
        .run(items, sentences, &mut NoProgress, None)
        .expect("optimization succeeds")
}

// ============================================================================
// SELECTION FIXTURES
// ============================================================================

/// Sentence records from raw coverage sets.
pub fn records(sets: &[Vec<VocabId>]) -> Vec<SentenceRecord> {
    sets.iter()
        .enumerate()
        .map(|(index, ids)| SentenceRecord {
            index,
            text: format!("sentence {}", index),
            coverage: ids.iter().copied().collect(),
        })
        .collect()
}

/// `0..vocab_size` minus the union of the chosen sentences' coverage.
pub fn expected_uncovered(
    sentences: &[SentenceRecord],
    chosen: &[usize],
    vocab_size: usize,
) -> Vec<VocabId> {
    let covered: BTreeSet<VocabId> = chosen
        .iter()
        .flat_map(|&i| sentences[i].coverage.iter().copied())
        .collect();
    (0..vocab_size).filter(|id| !covered.contains(id)).collect()
}

/// Fields of a report that must not depend on timing or parallelism.
pub fn stable_view(report: &OptimizationReport) -> String {
    let mut report = report.clone();
    report.summary.elapsed_seconds = 0.0;
    serde_json::to_string(&report).expect("report serializes")
}
