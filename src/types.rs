// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Core data types shared by every stage of the pipeline.
//!
//! Records here are fixed-schema and populated once. A `VocabularyEntry` is
//! built by the preprocessor and never touched again; a `SentenceRecord` gets
//! its coverage set exactly once from the coverage engine.
//!
//! Sets are `BTreeSet` rather than `HashSet` so that iteration order (and
//! therefore every report and serialized cache entry) is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stable 0-based vocabulary id, equal to the item's position in the input list.
pub type VocabId = usize;

/// Position of a sentence in the input corpus.
pub type SentenceIndex = usize;

/// The set of vocabulary ids a sentence satisfies.
pub type CoverageSet = BTreeSet<VocabId>;

/// One row of the user's vocabulary list, as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    /// Written form, possibly several `|`-joined variants (`"un|une"`).
    pub primary_form: String,
    /// Translation or definition. Carried through to reports only.
    #[serde(default)]
    pub gloss: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

impl VocabularyItem {
    pub fn new(primary_form: impl Into<String>, gloss: impl Into<String>) -> Self {
        Self {
            primary_form: primary_form.into(),
            gloss: gloss.into(),
            part_of_speech: None,
        }
    }

    pub fn with_part_of_speech(mut self, pos: impl Into<String>) -> Self {
        self.part_of_speech = Some(pos.into());
        self
    }
}

/// A vocabulary item expanded into everything the matcher needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub id: VocabId,
    pub canonical_text: String,
    /// `|`-split, trimmed, non-empty pieces of `canonical_text`, in input order.
    pub variants: Vec<String>,
    /// True if any variant contains internal whitespace.
    pub is_phrase: bool,
    pub match_tokens: BTreeSet<String>,
    pub match_lemmas: BTreeSet<String>,
}

/// One token of normalizer output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenLemma {
    pub token: String,
    pub lemma: String,
}

impl TokenLemma {
    pub fn new(token: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            lemma: lemma.into(),
        }
    }
}

/// A corpus sentence together with the vocabulary it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentenceRecord {
    pub index: SentenceIndex,
    pub text: String,
    pub coverage: CoverageSet,
}

/// A sentence prepared for index queries: case-folded text plus the token and
/// lemma sets the normalizer produced for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzedSentence {
    /// Lowercased, NFC-composed sentence text (phrase matching runs on this).
    pub text: String,
    /// Normalizer output in sentence order (used for match explanations).
    pub analysis: Vec<TokenLemma>,
    pub tokens: BTreeSet<String>,
    pub lemmas: BTreeSet<String>,
}

impl AnalyzedSentence {
    pub fn new(text: String, analysis: Vec<TokenLemma>) -> Self {
        let tokens = analysis.iter().map(|t| t.token.clone()).collect();
        let lemmas = analysis.iter().map(|t| t.lemma.clone()).collect();
        Self {
            text,
            analysis,
            tokens,
            lemmas,
        }
    }
}
