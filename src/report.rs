// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turn a finished selection into the serializable report.
//!
//! The report is assembled once, after selection ends, from the selection
//! state, the corpus coverage and the original vocabulary items. Nothing in
//! here feeds back into selection.

use serde::Serialize;

use crate::config::{Algorithm, OptimizerConfig};
use crate::coverage::CorpusCoverage;
use crate::select::{SelectionState, SelectionStatus};
use crate::types::{SentenceIndex, VocabId, VocabularyItem};

/// One selected sentence, in selection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedSentence {
    pub sentence_index: SentenceIndex,
    pub text: String,
    pub newly_covered_vocab_ids: Vec<VocabId>,
    /// Primary forms of `newly_covered_vocab_ids`, same order.
    pub newly_covered_words: Vec<String>,
    pub new_word_count: usize,
    pub total_coverage_count: usize,
}

/// Run-level statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub status: SelectionStatus,
    pub algorithm_used: Algorithm,
    pub sentences_analyzed: usize,
    pub sentences_selected: usize,
    pub words_covered: usize,
    pub total_words: usize,
    /// Percentage, two decimals. 100 for an empty vocabulary.
    pub coverage_percent: f64,
    pub target_coverage_percent: f64,
    pub target_met: bool,
    /// Words covered per selected sentence, 0 when nothing was selected.
    pub efficiency: f64,
    pub elapsed_seconds: f64,
    pub iterations: usize,
}

/// A vocabulary item no selected sentence covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingWord {
    pub vocab_id: VocabId,
    pub canonical_text: String,
    pub gloss: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

/// Where one vocabulary item occurs in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageMapEntry {
    pub vocab_id: VocabId,
    pub canonical_text: String,
    pub gloss: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    /// Covered by the selection.
    pub found: bool,
    /// Every corpus sentence that covers it, ascending.
    pub sentence_indices: Vec<SentenceIndex>,
    /// The subset of `sentence_indices` that was selected, ascending.
    pub selected_sentence_indices: Vec<SentenceIndex>,
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationReport {
    pub selected_sentences: Vec<SelectedSentence>,
    pub summary: Summary,
    pub missing_vocabulary: Vec<MissingWord>,
    pub coverage_map: Vec<CoverageMapEntry>,
}

impl OptimizationReport {
    /// Selected sentence indices in selection order.
    pub fn selected_indices(&self) -> Vec<SentenceIndex> {
        self.selected_sentences
            .iter()
            .map(|s| s.sentence_index)
            .collect()
    }

    pub fn missing_ids(&self) -> Vec<VocabId> {
        self.missing_vocabulary.iter().map(|m| m.vocab_id).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn primary_form(items: &[VocabularyItem], id: VocabId) -> String {
    items
        .get(id)
        .map(|item| item.primary_form.clone())
        .unwrap_or_default()
}

/// Assemble the report for a finished run.
pub fn assemble(
    items: &[VocabularyItem],
    coverage: &CorpusCoverage,
    state: &SelectionState,
    config: &OptimizerConfig,
    elapsed_seconds: f64,
) -> OptimizationReport {
    let selected_sentences: Vec<SelectedSentence> = state
        .selected()
        .iter()
        .map(|selection| SelectedSentence {
            sentence_index: selection.sentence_index,
            text: coverage
                .sentences
                .get(selection.sentence_index)
                .map(|s| s.text.clone())
                .unwrap_or_default(),
            newly_covered_words: selection
                .newly_covered
                .iter()
                .map(|&id| primary_form(items, id))
                .collect(),
            newly_covered_vocab_ids: selection.newly_covered.clone(),
            new_word_count: selection.newly_covered.len(),
            total_coverage_count: selection.total_coverage,
        })
        .collect();

    let total_words = state.total_words();
    let words_covered = state.words_covered();
    let sentences_selected = selected_sentences.len();
    let coverage_percent = if total_words == 0 {
        100.0
    } else {
        round2(words_covered as f64 * 100.0 / total_words as f64)
    };
    let efficiency = if sentences_selected == 0 {
        0.0
    } else {
        round2(words_covered as f64 / sentences_selected as f64)
    };

    let summary = Summary {
        status: state.status(),
        algorithm_used: config.algorithm,
        sentences_analyzed: coverage.sentences.len(),
        sentences_selected,
        words_covered,
        total_words,
        coverage_percent,
        target_coverage_percent: config.min_coverage_percent,
        target_met: coverage_percent >= config.min_coverage_percent,
        efficiency,
        elapsed_seconds: round2(elapsed_seconds),
        iterations: state.iterations(),
    };

    let missing_vocabulary = state
        .uncovered()
        .ids()
        .into_iter()
        .filter_map(|id| {
            items.get(id).map(|item| MissingWord {
                vocab_id: id,
                canonical_text: item.primary_form.clone(),
                gloss: item.gloss.clone(),
                part_of_speech: item.part_of_speech.clone(),
            })
        })
        .collect();

    let coverage_map = items
        .iter()
        .enumerate()
        .map(|(id, item)| {
            let sentence_indices = coverage.coverage_map.get(id).cloned().unwrap_or_default();
            let selected_sentence_indices = sentence_indices
                .iter()
                .copied()
                .filter(|&s| state.is_selected(s))
                .collect();
            CoverageMapEntry {
                vocab_id: id,
                canonical_text: item.primary_form.clone(),
                gloss: item.gloss.clone(),
                part_of_speech: item.part_of_speech.clone(),
                found: !state.uncovered().contains(id),
                sentence_indices,
                selected_sentence_indices,
            }
        })
        .collect();

    OptimizationReport {
        selected_sentences,
        summary,
        missing_vocabulary,
        coverage_map,
    }
}
