// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::error::NormalizeError;
use crate::normalize::{Normalizer, SimpleNormalizer};
use crate::types::{TokenLemma, VocabularyItem};

/// Create a vocabulary item with an empty gloss.
pub fn make_item(primary_form: &str) -> VocabularyItem {
    VocabularyItem::new(primary_form, "")
}

/// Create one item per primary form.
pub fn make_items(forms: &[&str]) -> Vec<VocabularyItem> {
    forms.iter().map(|f| make_item(f)).collect()
}

/// Owned corpus from string literals.
pub fn corpus(sentences: &[&str]) -> Vec<String> {
    sentences.iter().map(|s| s.to_string()).collect()
}

/// A small French vocabulary with glosses and parts of speech.
pub fn french_vocabulary() -> Vec<VocabularyItem> {
    [
        ("être", "to be", "verb"),
        ("un|une", "a/an", "article"),
        ("le monde", "the world", "noun"),
        ("avoir", "to have", "verb"),
        ("chat", "cat", "noun"),
        ("maison", "house", "noun"),
        ("aller", "to go", "verb"),
        ("faire", "to do/make", "verb"),
    ]
    .into_iter()
    .map(|(form, gloss, pos)| VocabularyItem::new(form, gloss).with_part_of_speech(pos))
    .collect()
}

/// Lemma table covering the inflected forms used in [`french_sentences`].
pub fn french_lemmas() -> SimpleNormalizer {
    SimpleNormalizer::with_lemmas([
        ("suis", "être"),
        ("es", "être"),
        ("est", "être"),
        ("sont", "être"),
        ("ai", "avoir"),
        ("as", "avoir"),
        ("a", "avoir"),
        ("allons", "aller"),
        ("vais", "aller"),
        ("fais", "faire"),
        ("chats", "chat"),
        ("maisons", "maison"),
    ])
}

/// Sentences exercising conjugation, gender variants and phrases.
pub fn french_sentences() -> Vec<String> {
    corpus(&[
        "Je suis un étudiant.",
        "Le monde est beau.",
        "J'ai une maison et un chat.",
        "Nous allons faire quelque chose.",
        "Les chats sont dans la maison.",
    ])
}

/// Normalizer whose backing service is down.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingNormalizer;

impl Normalizer for FailingNormalizer {
    fn normalize(&self, _text: &str) -> Result<Vec<TokenLemma>, NormalizeError> {
        Err(NormalizeError::Unavailable("model not loaded".to_string()))
    }
}

/// Behaves like [`SimpleNormalizer`] but rejects any text containing `marker`.
#[derive(Debug, Clone)]
pub struct MarkerFailingNormalizer {
    marker: String,
    inner: SimpleNormalizer,
}

impl MarkerFailingNormalizer {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
            inner: SimpleNormalizer::new(),
        }
    }
}

impl Normalizer for MarkerFailingNormalizer {
    fn normalize(&self, text: &str) -> Result<Vec<TokenLemma>, NormalizeError> {
        if text.contains(&self.marker) {
            return Err(NormalizeError::Rejected {
                text: text.to_string(),
                reason: "malformed record".to_string(),
            });
        }
        self.inner.normalize(text)
    }
}
