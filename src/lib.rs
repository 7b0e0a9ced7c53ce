// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Vocabulary coverage optimization.
//!
//! Given a vocabulary list and a corpus of sentences, pick a small ordered
//! subset of sentences that together contain as much of the vocabulary as
//! possible, within a sentence budget. A word counts as present when its
//! surface form, its lemma, or (for multi-word entries) the whole phrase
//! occurs in the sentence.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   vocab/     │────▶│   index/     │────▶│  coverage/   │
//! │ (preprocess, │     │ (token,lemma,│     │ (per-sentence│
//! │  cache)      │     │  phrase)     │     │  sets, pool) │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                                                  │
//!                                                  ▼
//!                      ┌──────────────┐     ┌──────────────┐
//!                      │  report.rs   │◀────│   select/    │
//!                      │ (summary,    │     │ (greedy,     │
//!                      │  missing)    │     │  beam, state)│
//!                      └──────────────┘     └──────────────┘
//! ```
//!
//! Data flows one way. The vocabulary entries and the index are built once
//! per run and only read after; sentence coverage is computed once and shared
//! by every strategy. Debug builds check the selection invariants on every
//! run (see [`contracts`]).
//!
//! # Usage
//!
//! ```ignore
//! use lexcover::{NoProgress, Optimizer, OptimizerConfig, SimpleNormalizer, VocabularyItem};
//!
//! let items = vec![VocabularyItem::new("chat", "cat"), VocabularyItem::new("le monde", "the world")];
//! let corpus = vec!["Le monde est beau.".to_string(), "Un chat.".to_string()];
//!
//! let optimizer = Optimizer::new(OptimizerConfig::default(), SimpleNormalizer::new())?;
//! let report = optimizer.run(&items, &corpus, &mut NoProgress, None)?;
//! println!("{}% covered", report.summary.coverage_percent);
//! ```

pub mod config;
pub mod contracts;
pub mod coverage;
pub mod error;
pub mod index;
pub mod normalize;
pub mod optimizer;
pub mod progress;
pub mod report;
pub mod select;
pub mod testing;
mod types;
pub mod utils;
pub mod vocab;

pub use config::{Algorithm, OptimizerConfig};
pub use coverage::{
    analyze_text, build_coverage_map, compute_coverage, sentence_coverage, CorpusCoverage,
    WorkerPool,
};
pub use error::{CoverError, NormalizeError, Result};
pub use index::{MatchChannel, MatchDetail, MatchingIndex, PhraseMatcher, PhrasePattern};
pub use normalize::{Normalizer, SimpleNormalizer};
pub use optimizer::Optimizer;
pub use progress::{CancellationToken, NoProgress, ProgressSink, ProgressUpdate, Stage};
pub use report::{
    assemble, CoverageMapEntry, MissingWord, OptimizationReport, SelectedSentence, Summary,
};
pub use select::{select, Scoring, Selection, SelectionState, SelectionStatus, UncoveredSet};
pub use types::{
    AnalyzedSentence, CoverageSet, SentenceIndex, SentenceRecord, TokenLemma, VocabId,
    VocabularyEntry, VocabularyItem,
};
pub use vocab::{
    preprocess_entry, preprocess_vocabulary, split_variants, CacheKey, DiskCache, MemoryCache,
    NoCache, VocabularyCache,
};
