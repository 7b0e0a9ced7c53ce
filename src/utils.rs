// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility functions for string processing.

use unicode_normalization::UnicodeNormalization;

/// Fold a string for matching: NFC-compose, lowercase, and unify apostrophes.
///
/// Composition matters because the same word can arrive precomposed (`é`,
/// U+00E9) or decomposed (`e` + U+0301) depending on where the text was
/// copied from. Unlike search normalization, diacritics are kept: `ou` and
/// `où` are different vocabulary items.
///
/// - "Café"        → "café"
/// - "aujourd’hui" → "aujourd'hui"
pub fn fold_case(value: &str) -> String {
    value
        .nfc()
        .map(|c| if c == '\u{2019}' { '\'' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Word characters in the `\b` sense: Unicode alphanumerics and underscore.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Maximal runs of word characters, in order.
pub fn word_runs(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|run| !run.is_empty())
}

/// True if byte offset `at` in `text` sits on a word boundary.
///
/// A boundary is where exactly one side is a word character; the start and
/// end of the string count as non-word.
pub fn is_word_boundary(text: &str, at: usize) -> bool {
    let before = text[..at].chars().next_back().is_some_and(is_word_char);
    let after = text[at..].chars().next().is_some_and(is_word_char);
    before != after
}

/// Find the first occurrence of `needle` in `haystack` that starts and ends on
/// word boundaries. Returns the byte offset.
///
/// Overlapping candidates are considered, so `"la la"` is found in
/// `"lala la la"` at offset 5 even though the first raw hit is rejected.
pub fn find_bounded(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let mut start = 0;
    while let Some(rel) = haystack[start..].find(needle) {
        let at = start + rel;
        let end = at + needle.len();
        if is_word_boundary(haystack, at) && is_word_boundary(haystack, end) {
            return Some(at);
        }
        // Step one character past the rejected hit.
        let step = haystack[at..].chars().next().map_or(1, char::len_utf8);
        start = at + step;
    }
    None
}

/// Convert a byte offset into a character offset.
pub fn char_offset(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}
