// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the lexcover CLI.
//!
//! Output is boxed and colored by role ([`Tone`]), with one RGB value per
//! role for dark backgrounds and one for light. `LEXCOVER_THEME` ("dark" or
//! "light") picks the background, else the `COLORFGBG` hint some terminals
//! set, else dark. No color at all under `NO_COLOR` or when stdout is not a
//! TTY.

use std::sync::OnceLock;

use lexcover::{MatchChannel, MatchDetail, MatchingIndex, OptimizationReport, SelectionStatus};

/// Width between │ and │ (excluding border chars).
pub const BOX_WIDTH: usize = 80;

/// How many selected sentences and missing words the summary lists.
const LIST_LIMIT: usize = 10;

const RESET: &str = "\x1b[0m";

// ═══════════════════════════════════════════════════════════════════════════
// COLOR
// ═══════════════════════════════════════════════════════════════════════════

/// What a piece of output is, which decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Box borders.
    Frame,
    /// Secondary text: indices, glosses, footers.
    Muted,
    /// Section labels and the banner title.
    Heading,
    Good,
    Warn,
    Bad,
    Phrase,
    Token,
    Lemma,
}

impl Tone {
    /// (dark background, light background)
    fn rgb(self) -> ((u8, u8, u8), (u8, u8, u8)) {
        match self {
            Tone::Frame | Tone::Muted => ((92, 99, 112), (160, 161, 167)),
            Tone::Heading | Tone::Lemma => ((86, 182, 194), (1, 132, 188)),
            Tone::Good => ((152, 195, 121), (80, 161, 79)),
            Tone::Warn => ((229, 192, 123), (193, 132, 1)),
            Tone::Bad => ((224, 108, 117), (228, 86, 73)),
            Tone::Phrase => ((198, 120, 221), (166, 38, 164)),
            Tone::Token => ((97, 175, 239), (64, 120, 242)),
        }
    }

    fn escape(self) -> String {
        let (dark, light) = self.rgb();
        let (r, g, b) = if light_background() { light } else { dark };
        let dim = if self == Tone::Muted { "\x1b[2m" } else { "" };
        format!("{}\x1b[38;2;{};{};{}m", dim, r, g, b)
    }
}

fn light_background() -> bool {
    static LIGHT: OnceLock<bool> = OnceLock::new();
    *LIGHT.get_or_init(|| {
        match std::env::var("LEXCOVER_THEME").map(|t| t.to_lowercase()) {
            Ok(t) if t == "light" => return true,
            Ok(t) if t == "dark" => return false,
            _ => {}
        }
        // "fg;bg": backgrounds 7 and 9-15 are light
        std::env::var("COLORFGBG")
            .ok()
            .and_then(|v| v.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()))
            .is_some_and(|bg| bg == 7 || bg > 8)
    })
}

fn colors_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
    })
}

/// `text` in `tone`, optionally bold; plain text when color is off.
pub fn paint(tone: Tone, bold: bool, text: &str) -> String {
    if !colors_enabled() {
        return text.to_string();
    }
    let weight = if bold { "\x1b[1m" } else { "" };
    format!("{}{}{}{}", weight, tone.escape(), text, RESET)
}

fn frame(text: &str) -> String {
    paint(Tone::Frame, false, text)
}

// ═══════════════════════════════════════════════════════════════════════════
// LAYOUT
// ═══════════════════════════════════════════════════════════════════════════

/// Printed width of `s`, not counting `ESC [ ... m` sequences.
pub fn visible_len(s: &str) -> usize {
    let mut pieces = s.split('\x1b');
    let lead = pieces.next().map_or(0, |p| p.chars().count());
    lead + pieces
        .map(|p| p.split_once('m').map_or(0, |(_, rest)| rest.chars().count()))
        .sum::<usize>()
}

/// Right-pad a styled string to a fixed visible width.
pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_len(s));
    format!("{}{}", s, " ".repeat(fill))
}

/// Cut `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// │ content          │
pub fn row(content: &str) {
    println!("{}{}{}", frame("│"), pad_right(content, BOX_WIDTH), frame("│"));
}

fn rule(left: char, right: char, label: Option<&str>) {
    let label = label
        .map(|l| format!("─ {} ", paint(Tone::Heading, true, l)))
        .unwrap_or_default();
    let line = "─".repeat(BOX_WIDTH.saturating_sub(visible_len(&label)));
    println!("{}{}{}", frame(&left.to_string()), label, frame(&format!("{}{}", line, right)));
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    rule('┌', '┐', Some(label));
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    rule('├', '┤', Some(label));
}

/// └──────────────────┘
pub fn section_bot() {
    rule('└', '┘', None);
}

/// Double-ruled title box.
pub fn banner(text: &str) {
    let title = paint(Tone::Heading, true, text);
    let space = BOX_WIDTH.saturating_sub(visible_len(&title));
    let edge = "═".repeat(BOX_WIDTH);
    println!("{}", frame(&format!("╔{}╗", edge)));
    println!(
        "{}{}{}{}{}",
        frame("║"),
        " ".repeat(space / 2),
        title,
        " ".repeat(space - space / 2),
        frame("║")
    );
    println!("{}", frame(&format!("╚{}╝", edge)));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

pub fn status_badge(status: SelectionStatus) -> String {
    let label = format!("[{}]", status.as_str().to_uppercase());
    match status {
        SelectionStatus::Complete => paint(Tone::Good, true, &label),
        SelectionStatus::Stopped => paint(Tone::Warn, true, &label),
        SelectionStatus::Exhausted => paint(Tone::Bad, true, &label),
        _ => paint(Tone::Muted, false, &label),
    }
}

/// Coverage percentage, green at or above target, yellow within ten points.
pub fn coverage_colored(percent: f64, target: f64) -> String {
    let text = format!("{:>6.2}%", percent);
    if percent >= target {
        paint(Tone::Good, true, &text)
    } else if percent >= target - 10.0 {
        paint(Tone::Warn, true, &text)
    } else {
        paint(Tone::Bad, true, &text)
    }
}

pub fn channel_label(channel: MatchChannel) -> String {
    match channel {
        MatchChannel::Phrase => paint(Tone::Phrase, false, "phrase"),
        MatchChannel::Token => paint(Tone::Token, false, "token"),
        MatchChannel::Lemma => paint(Tone::Lemma, false, "lemma"),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

/// Boxed run summary: statistics, first selected sentences, first gaps.
pub fn print_summary(report: &OptimizationReport) {
    let s = &report.summary;
    banner("LEXCOVER");

    section_top("SUMMARY");
    row(&format!("  Status      {}", status_badge(s.status)));
    row(&format!("  Algorithm   {}", s.algorithm_used));
    row(&format!(
        "  Sentences   {} selected of {} analyzed",
        s.sentences_selected, s.sentences_analyzed
    ));
    row(&format!(
        "  Coverage    {}  {}/{} words, target {:.0}%",
        coverage_colored(s.coverage_percent, s.target_coverage_percent),
        s.words_covered,
        s.total_words,
        s.target_coverage_percent
    ));
    row(&format!("  Efficiency  {:.2} words/sentence", s.efficiency));
    row(&format!(
        "  Elapsed     {:.2}s over {} iterations",
        s.elapsed_seconds, s.iterations
    ));

    if !report.selected_sentences.is_empty() {
        section_mid("SELECTED");
        for sentence in report.selected_sentences.iter().take(LIST_LIMIT) {
            let gain = paint(Tone::Good, false, &format!("+{:<3}", sentence.new_word_count));
            let index = paint(Tone::Muted, false, &format!("#{:<6}", sentence.sentence_index));
            row(&format!(
                "  {} {} {}",
                index,
                gain,
                truncate_chars(&sentence.text, BOX_WIDTH - 16)
            ));
        }
        let rest = report.selected_sentences.len().saturating_sub(LIST_LIMIT);
        if rest > 0 {
            row(&paint(Tone::Muted, false, &format!("  … and {} more", rest)));
        }
    }

    if !report.missing_vocabulary.is_empty() {
        section_mid("MISSING");
        for word in report.missing_vocabulary.iter().take(LIST_LIMIT) {
            let gloss = if word.gloss.is_empty() {
                String::new()
            } else {
                paint(Tone::Muted, false, &format!("  {}", word.gloss))
            };
            row(&format!(
                "  {}{}",
                paint(Tone::Bad, false, &truncate_chars(&word.canonical_text, 36)),
                gloss
            ));
        }
        let rest = report.missing_vocabulary.len().saturating_sub(LIST_LIMIT);
        if rest > 0 {
            row(&paint(Tone::Muted, false, &format!("  … and {} more", rest)));
        }
    }
    section_bot();
}

/// One-line size of the lookup tables behind a match listing.
pub fn index_summary(index: &MatchingIndex) -> String {
    let (tokens, lemmas) = index.key_counts();
    format!(
        "{} entries, {} tokens, {} lemmas{}, {} phrases",
        index.entry_count(),
        tokens,
        lemmas,
        if index.lemma_matching() { "" } else { " (off)" },
        index.phrase_patterns().len()
    )
}

/// One row per vocabulary entry that matched `sentence`.
pub fn print_matches(sentence: &str, matches: &[(String, MatchDetail)], index: &MatchingIndex) {
    section_top("SENTENCE");
    row(&format!("  {}", truncate_chars(sentence, BOX_WIDTH - 4)));
    section_mid(&format!("MATCHES ({})", matches.len()));
    if matches.is_empty() {
        row(&paint(Tone::Muted, false, "  no vocabulary entry matches"));
    }
    for (canonical, detail) in matches {
        let channel = detail.channel.map(channel_label).unwrap_or_default();
        let at = detail
            .position
            .map(|p| format!(" @{}", p))
            .unwrap_or_default();
        row(&format!(
            "  {} {} {}{}",
            pad_right(&truncate_chars(canonical, 28), 28),
            pad_right(&channel, 8),
            detail.matched_form.as_deref().unwrap_or(""),
            paint(Tone::Muted, false, &at)
        ));
    }
    section_mid("INDEX");
    row(&paint(Tone::Muted, false, &format!("  {}", index_summary(index))));
    section_bot();
}
