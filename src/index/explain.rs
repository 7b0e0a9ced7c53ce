// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-entry match explanation, for debugging a vocabulary list.

use serde::Serialize;

use super::MatchingIndex;
use crate::types::{AnalyzedSentence, VocabularyEntry};
use crate::utils::{char_offset, find_bounded, fold_case};

/// Which channel produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchChannel {
    Phrase,
    Token,
    Lemma,
}

/// Why (or whether) an entry matched a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    pub found: bool,
    pub channel: Option<MatchChannel>,
    /// Variant or sentence token that matched.
    pub matched_form: Option<String>,
    /// Character offset in the case-folded sentence, when it can be located.
    pub position: Option<usize>,
}

impl MatchDetail {
    fn miss() -> Self {
        Self {
            found: false,
            channel: None,
            matched_form: None,
            position: None,
        }
    }

    fn hit(channel: MatchChannel, form: &str, position: Option<usize>) -> Self {
        Self {
            found: true,
            channel: Some(channel),
            matched_form: Some(form.to_string()),
            position,
        }
    }
}

impl MatchingIndex {
    /// Explain how `entry` matches `sentence`.
    ///
    /// Channels are tried in order phrase, token, lemma and the first hit is
    /// reported. The verdict always agrees with [`MatchingIndex::query`].
    pub fn explain(&self, entry: &VocabularyEntry, sentence: &AnalyzedSentence) -> MatchDetail {
        if entry.is_phrase {
            for variant in &entry.variants {
                if let Some(at) = find_bounded(&sentence.text, &fold_case(variant)) {
                    return MatchDetail::hit(
                        MatchChannel::Phrase,
                        variant,
                        Some(char_offset(&sentence.text, at)),
                    );
                }
            }
            return MatchDetail::miss();
        }

        let positions = token_positions(sentence);

        for (pair, position) in sentence.analysis.iter().zip(&positions) {
            if entry.match_tokens.contains(&pair.token) {
                return MatchDetail::hit(MatchChannel::Token, &pair.token, *position);
            }
        }

        if self.lemma_matching() {
            for (pair, position) in sentence.analysis.iter().zip(&positions) {
                if entry.match_lemmas.contains(&pair.lemma) {
                    return MatchDetail::hit(MatchChannel::Lemma, &pair.token, *position);
                }
            }
        }

        MatchDetail::miss()
    }
}

/// Locate each token in the sentence text, scanning left to right.
///
/// Normalizers aren't required to return substrings of the input, so a token
/// that can't be found gets `None` and the scan continues from where it was.
fn token_positions(sentence: &AnalyzedSentence) -> Vec<Option<usize>> {
    let mut cursor = 0;
    sentence
        .analysis
        .iter()
        .map(|pair| {
            let rel = sentence.text[cursor..].find(pair.token.as_str())?;
            let at = cursor + rel;
            cursor = at + pair.token.len();
            Some(char_offset(&sentence.text, at))
        })
        .collect()
}
