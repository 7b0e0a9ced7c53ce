// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The linguistic normalization seam.
//!
//! Tokenization and lemmatization live outside this crate. All the matcher ever
//! sees is the [`Normalizer`] contract: text in, ordered `(token, lemma)` pairs
//! out, identical output for identical input. A real deployment plugs in a
//! trained pipeline; [`SimpleNormalizer`] is the built-in fallback, a
//! rule-based tokenizer with a lookup-table lemmatizer.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::error::{NormalizeError, Result};
use crate::types::TokenLemma;
use crate::utils::{fold_case, is_word_char};

/// Turns text into `(token, lemma)` pairs.
///
/// Implementations must be deterministic and safe to call from several worker
/// threads at once.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, text: &str) -> std::result::Result<Vec<TokenLemma>, NormalizeError>;

    /// Identifies the normalizer's behaviour for cache keying. Two normalizers
    /// that can produce different output for the same text must return
    /// different fingerprints.
    fn fingerprint(&self) -> String {
        String::new()
    }
}

impl<N: Normalizer + ?Sized> Normalizer for &N {
    fn normalize(&self, text: &str) -> std::result::Result<Vec<TokenLemma>, NormalizeError> {
        (**self).normalize(text)
    }

    fn fingerprint(&self) -> String {
        (**self).fingerprint()
    }
}

impl<N: Normalizer + ?Sized> Normalizer for Arc<N> {
    fn normalize(&self, text: &str) -> std::result::Result<Vec<TokenLemma>, NormalizeError> {
        (**self).normalize(text)
    }

    fn fingerprint(&self) -> String {
        (**self).fingerprint()
    }
}

impl<N: Normalizer + ?Sized> Normalizer for Box<N> {
    fn normalize(&self, text: &str) -> std::result::Result<Vec<TokenLemma>, NormalizeError> {
        (**self).normalize(text)
    }

    fn fingerprint(&self) -> String {
        (**self).fingerprint()
    }
}

/// Rule-based tokenizer plus a `token → lemma` lookup table.
///
/// Tokens are maximal runs of word characters. A run followed directly by an
/// apostrophe keeps it, which is how French elision is written: `j'ai` gives
/// `j'` and `ai`. Tokens without a table entry are their own lemma.
#[derive(Debug, Clone, Default)]
pub struct SimpleNormalizer {
    lemmas: HashMap<String, String>,
}

impl SimpleNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build with a lemma table. Keys and values are case-folded.
    pub fn with_lemmas<I, K, V>(table: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let lemmas = table
            .into_iter()
            .map(|(k, v)| (fold_case(k.as_ref()), fold_case(v.as_ref())))
            .collect();
        Self { lemmas }
    }

    /// Load a lemma table from a JSON object of `{"token": "lemma", ...}`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let table: HashMap<String, String> = serde_json::from_str(&content)?;
        Ok(Self::with_lemmas(table))
    }

    /// Distinct (case-folded) tokens in the lemma table.
    pub fn lemma_count(&self) -> usize {
        self.lemmas.len()
    }

    /// Split case-folded text into tokens.
    pub fn tokenize(text: &str) -> Vec<String> {
        let folded = fold_case(text);
        let mut tokens = Vec::new();
        let mut current = String::new();

        for c in folded.chars() {
            if is_word_char(c) {
                current.push(c);
            } else if c == '\'' && !current.is_empty() {
                current.push(c);
                tokens.push(std::mem::take(&mut current));
            } else if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            tokens.push(current);
        }
        tokens
    }

    fn lemma_of(&self, token: &str) -> String {
        self.lemmas
            .get(token)
            .cloned()
            .unwrap_or_else(|| token.to_string())
    }
}

impl Normalizer for SimpleNormalizer {
    fn normalize(&self, text: &str) -> std::result::Result<Vec<TokenLemma>, NormalizeError> {
        Ok(Self::tokenize(text)
            .into_iter()
            .map(|token| {
                let lemma = self.lemma_of(&token);
                TokenLemma { token, lemma }
            })
            .collect())
    }

    fn fingerprint(&self) -> String {
        // Sorted so the fingerprint doesn't depend on HashMap iteration order.
        let mut pairs: Vec<(&String, &String)> = self.lemmas.iter().collect();
        pairs.sort();
        let mut hasher = Sha256::new();
        hasher.update(b"simple-v1");
        for (token, lemma) in pairs {
            hasher.update((token.len() as u64).to_le_bytes());
            hasher.update(token.as_bytes());
            hasher.update((lemma.len() as u64).to_le_bytes());
            hasher.update(lemma.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}
