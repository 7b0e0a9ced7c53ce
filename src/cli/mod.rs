// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the lexcover command-line interface.
//!
//! Two subcommands: `optimize` runs the full pipeline and writes a JSON
//! report, `explain` shows which vocabulary entries one sentence matches and
//! through which channel. Flags override the matching field of the optional
//! `--config` file.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use lexcover::{Algorithm, OptimizerConfig};

#[derive(Parser)]
#[command(
    name = "lexcover",
    about = "Pick a small set of sentences that covers a vocabulary list",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Select sentences covering a vocabulary list
    Optimize {
        /// Vocabulary JSON: array of {primaryForm, gloss, partOfSpeech}
        #[arg(long)]
        vocab: PathBuf,

        /// Corpus: JSON array of strings, or one sentence per line
        #[arg(long)]
        sentences: PathBuf,

        /// Optimizer configuration JSON (camelCase keys, all optional)
        #[arg(long)]
        config: Option<PathBuf>,

        /// greedy, weighted_greedy or beam_search
        #[arg(long)]
        algorithm: Option<Algorithm>,

        /// Sentence budget
        #[arg(long)]
        max_sentences: Option<usize>,

        /// Beam search: states kept per level
        #[arg(long)]
        beam_width: Option<usize>,

        /// Beam search: lookahead levels
        #[arg(long)]
        beam_depth: Option<usize>,

        /// Worker threads for sentence analysis
        #[arg(long)]
        workers: Option<usize>,

        /// Analyze sentences on the calling thread only
        #[arg(long)]
        no_parallel: bool,

        /// Match exact surface forms only (disables the lemma channel)
        #[arg(long)]
        exact: bool,

        /// Lemma table JSON: {"token": "lemma", ...}
        #[arg(long)]
        lemmas: Option<PathBuf>,

        /// Persist preprocessed vocabulary here between runs
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Write the JSON report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// No progress bar or summary box
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show which vocabulary entries a sentence matches
    Explain {
        /// Vocabulary JSON
        #[arg(long)]
        vocab: PathBuf,

        /// Sentence to analyze
        #[arg(long)]
        sentence: String,

        /// Lemma table JSON
        #[arg(long)]
        lemmas: Option<PathBuf>,

        /// Match exact surface forms only
        #[arg(long)]
        exact: bool,
    },
}

/// CLI overrides for [`OptimizerConfig`] fields.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub algorithm: Option<Algorithm>,
    pub max_sentences: Option<usize>,
    pub beam_width: Option<usize>,
    pub beam_depth: Option<usize>,
    pub workers: Option<usize>,
    pub no_parallel: bool,
    pub exact: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: OptimizerConfig) -> OptimizerConfig {
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(n) = self.max_sentences {
            config.max_sentences = n;
        }
        if let Some(n) = self.beam_width {
            config.beam_width = n;
        }
        if let Some(n) = self.beam_depth {
            config.beam_depth = n;
        }
        if let Some(n) = self.workers {
            config.worker_count = n;
        }
        if self.no_parallel {
            config.parallel = false;
        }
        if self.exact {
            config.exact_match = true;
        }
        config
    }
}
