// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lexcover::{
    analyze_text, DiskCache, NoProgress, OptimizationReport, Optimizer, OptimizerConfig,
    SimpleNormalizer, VocabularyItem,
};

mod cli;
use cli::{display, Cli, Commands, ConfigOverrides};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LEXCOVER_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Optimize {
            vocab,
            sentences,
            config,
            algorithm,
            max_sentences,
            beam_width,
            beam_depth,
            workers,
            no_parallel,
            exact,
            lemmas,
            cache_dir,
            output,
            quiet,
        } => {
            let overrides = ConfigOverrides {
                algorithm,
                max_sentences,
                beam_width,
                beam_depth,
                workers,
                no_parallel,
                exact,
            };
            run_optimize(
                &vocab,
                &sentences,
                config.as_deref(),
                &overrides,
                lemmas.as_deref(),
                cache_dir.as_deref(),
                output.as_deref(),
                quiet,
            )
        }
        Commands::Explain {
            vocab,
            sentence,
            lemmas,
            exact,
        } => run_explain(&vocab, &sentence, lemmas.as_deref(), exact),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_optimize(
    vocab_path: &Path,
    sentences_path: &Path,
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
    lemmas_path: Option<&Path>,
    cache_dir: Option<&Path>,
    output: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let base = match config_path {
        Some(path) => OptimizerConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => OptimizerConfig::default(),
    };
    let config = overrides.apply(base);

    let items = load_vocabulary(vocab_path)?;
    let corpus = load_sentences(sentences_path)?;
    let normalizer = load_normalizer(lemmas_path)?;

    let mut optimizer = Optimizer::new(config, normalizer)?;
    if let Some(dir) = cache_dir {
        optimizer = optimizer.with_cache(Box::new(DiskCache::new(dir)));
    }

    let report = if quiet {
        optimizer.run(&items, &corpus, &mut NoProgress, None)?
    } else {
        run_with_progress(&optimizer, &items, &corpus)?
    };

    write_report(&report, output)?;
    // Without --output stdout carries the JSON report
    if !quiet && output.is_some() {
        display::print_summary(&report);
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn run_with_progress(
    optimizer: &Optimizer<SimpleNormalizer>,
    items: &[VocabularyItem],
    corpus: &[String],
) -> Result<OptimizationReport> {
    let mut bar = progress::TerminalProgress::new(corpus.len());
    let report = optimizer.run(items, corpus, &mut bar, None);
    bar.finish();
    Ok(report?)
}

#[cfg(not(feature = "parallel"))]
fn run_with_progress(
    optimizer: &Optimizer<SimpleNormalizer>,
    items: &[VocabularyItem],
    corpus: &[String],
) -> Result<OptimizationReport> {
    Ok(optimizer.run(items, corpus, &mut NoProgress, None)?)
}

fn run_explain(
    vocab_path: &Path,
    sentence: &str,
    lemmas_path: Option<&Path>,
    exact: bool,
) -> Result<()> {
    let items = load_vocabulary(vocab_path)?;
    let normalizer = load_normalizer(lemmas_path)?;
    let config = OptimizerConfig {
        exact_match: exact,
        cache_enabled: false,
        ..Default::default()
    };
    let optimizer = Optimizer::new(config, normalizer)?;
    let (entries, index) = optimizer.prepare(&items)?;
    let analyzed = analyze_text(optimizer.normalizer(), sentence)?;

    let matches: Vec<_> = entries
        .iter()
        .map(|entry| (entry.canonical_text.clone(), index.explain(entry, &analyzed)))
        .filter(|(_, detail)| detail.found)
        .collect();
    display::print_matches(sentence, &matches, &index);
    Ok(())
}

fn load_vocabulary(path: &Path) -> Result<Vec<VocabularyItem>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read vocabulary {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid vocabulary JSON in {}", path.display()))
}

/// JSON array of strings, or one sentence per non-empty line.
fn load_sentences(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sentences {}", path.display()))?;
    parse_sentences(&content)
        .with_context(|| format!("Invalid sentence list in {}", path.display()))
}

fn parse_sentences(content: &str) -> Result<Vec<String>> {
    if content.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(content)?);
    }
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn load_normalizer(path: Option<&Path>) -> Result<SimpleNormalizer> {
    match path {
        Some(path) => {
            let normalizer = SimpleNormalizer::from_json_file(path)
                .with_context(|| format!("Failed to load lemma table {}", path.display()))?;
            info!(lemmas = normalizer.lemma_count(), path = %path.display(), "loaded lemma table");
            Ok(normalizer)
        }
        None => Ok(SimpleNormalizer::new()),
    }
}

fn write_report(report: &OptimizationReport, output: Option<&Path>) -> Result<()> {
    let json = report.to_json()?;
    match output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write report {}", path.display()))?;
            eprintln!("✓ Report written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}

#[cfg(feature = "parallel")]
mod progress {
    use indicatif::{ProgressBar, ProgressStyle};
    use lexcover::{ProgressSink, ProgressUpdate, Stage};

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:<28} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
    }

    /// Progress bar on stderr, one phase at a time.
    pub struct TerminalProgress {
        bar: ProgressBar,
        stage: Option<Stage>,
        corpus_len: usize,
    }

    impl TerminalProgress {
        pub fn new(corpus_len: usize) -> Self {
            let bar = ProgressBar::new(corpus_len as u64);
            bar.set_style(style());
            Self {
                bar,
                stage: None,
                corpus_len,
            }
        }

        pub fn finish(&self) {
            self.bar.finish_and_clear();
        }
    }

    impl ProgressSink for TerminalProgress {
        fn report(&mut self, update: &ProgressUpdate) {
            if self.stage != Some(update.stage) {
                self.stage = Some(update.stage);
                self.bar.reset();
                self.bar.set_prefix(update.stage.label());
            }
            match update.stage {
                Stage::Analyzing => {
                    self.bar.set_length(self.corpus_len as u64);
                    self.bar.set_message("sentences");
                    self.bar.set_position(update.current_iteration as u64);
                }
                _ => {
                    self.bar.set_length(update.total_words as u64);
                    self.bar.set_position(update.words_covered as u64);
                    self.bar
                        .set_message(format!("words, {} sentences", update.sentences_selected));
                }
            }
        }
    }
}
