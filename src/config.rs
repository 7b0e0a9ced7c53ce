// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Run configuration.
//!
//! `OptimizerConfig` is plain data with serde support so it can come from a
//! JSON file, and every field has a default so a partial file is fine. Call
//! [`OptimizerConfig::validate`] before using it; the [`Optimizer`](crate::Optimizer)
//! does this on construction so a bad budget never reaches the selection loop.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{CoverError, Result};

/// Selection strategy, one per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Greedy,
    #[default]
    WeightedGreedy,
    BeamSearch,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Greedy => "greedy",
            Algorithm::WeightedGreedy => "weighted_greedy",
            Algorithm::BeamSearch => "beam_search",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(Algorithm::Greedy),
            "weighted_greedy" | "weighted-greedy" => Ok(Algorithm::WeightedGreedy),
            "beam_search" | "beam-search" => Ok(Algorithm::BeamSearch),
            other => Err(CoverError::Configuration(format!(
                "unknown algorithm '{}' (expected greedy, weighted_greedy or beam_search)",
                other
            ))),
        }
    }
}

/// Configuration for one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizerConfig {
    pub algorithm: Algorithm,
    /// Sentence budget.
    pub max_sentences: usize,
    /// Informational coverage target; reported, never enforced.
    pub min_coverage_percent: f64,
    pub lemma_matching: bool,
    /// Disables the lemma channel when set, regardless of `lemma_matching`.
    pub exact_match: bool,
    pub parallel: bool,
    pub worker_count: usize,
    /// Corpora at or below this size are analyzed sequentially.
    pub parallel_threshold: usize,
    pub beam_width: usize,
    pub beam_depth: usize,
    /// Cap on selection steps (greedy steps and beam levels).
    pub max_iterations: usize,
    pub progress_interval_iterations: usize,
    pub new_word_weight: f64,
    pub redundancy_weight: f64,
    pub cache_enabled: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::WeightedGreedy,
            max_sentences: 600,
            min_coverage_percent: 95.0,
            lemma_matching: true,
            exact_match: false,
            parallel: true,
            worker_count: 4,
            parallel_threshold: 100,
            beam_width: 5,
            beam_depth: 3,
            max_iterations: 1000,
            progress_interval_iterations: 10,
            new_word_weight: 10.0,
            redundancy_weight: 0.5,
            cache_enabled: true,
        }
    }
}

impl OptimizerConfig {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: OptimizerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Whether the lemma channel participates in matching.
    pub fn lemma_channel_enabled(&self) -> bool {
        self.lemma_matching && !self.exact_match
    }

    /// Reject configurations that would make the run meaningless.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("maxSentences", self.max_sentences),
            ("workerCount", self.worker_count),
            ("beamWidth", self.beam_width),
            ("beamDepth", self.beam_depth),
            ("maxIterations", self.max_iterations),
            ("progressIntervalIterations", self.progress_interval_iterations),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(CoverError::Configuration(format!("{} must be > 0", name)));
            }
        }

        if !(0.0..=100.0).contains(&self.min_coverage_percent) {
            return Err(CoverError::Configuration(format!(
                "minCoveragePercent must be within [0, 100], got {}",
                self.min_coverage_percent
            )));
        }

        for (name, weight) in [
            ("newWordWeight", self.new_word_weight),
            ("redundancyWeight", self.redundancy_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(CoverError::Configuration(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, weight
                )));
            }
        }
        if self.new_word_weight == 0.0 {
            return Err(CoverError::Configuration(
                "newWordWeight must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}
