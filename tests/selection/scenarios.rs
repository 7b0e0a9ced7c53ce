//! Small worked examples with known answers.

use lexcover::{Algorithm, OptimizerConfig, SelectionStatus};

use crate::common::{
    french_lemmas, french_sentences, french_vocabulary, optimize, optimize_with, sequential,
    ALL_ALGORITHMS,
};

#[test]
fn tie_goes_to_lowest_index() {
    for algorithm in ALL_ALGORITHMS {
        let report = optimize(
            &["bonjour", "chat", "chien", "maison"],
            &["Bonjour mon chat", "Le chien et la maison"],
            sequential(algorithm),
        );
        assert_eq!(report.selected_indices(), vec![0, 1], "{}", algorithm);
        assert_eq!(report.summary.coverage_percent, 100.0);
        assert_eq!(report.summary.status, SelectionStatus::Complete);
        assert_eq!(report.selected_sentences[0].newly_covered_vocab_ids, vec![0, 1]);
        assert_eq!(report.selected_sentences[1].newly_covered_vocab_ids, vec![2, 3]);
    }
}

#[test]
fn gender_variant_counts_once() {
    let report = optimize(
        &["un|une"],
        &["J'ai un chat.", "Une maison est grande."],
        sequential(Algorithm::WeightedGreedy),
    );
    assert_eq!(report.selected_indices(), vec![0]);
    assert_eq!(report.summary.words_covered, 1);
    assert_eq!(report.summary.total_words, 1);
    assert!(report.missing_vocabulary.is_empty());
    // Both sentences match, only one was needed.
    assert_eq!(report.coverage_map[0].sentence_indices, vec![0, 1]);
    assert_eq!(report.coverage_map[0].selected_sentence_indices, vec![0]);
}

#[test]
fn phrase_needs_word_boundaries_and_adjacency() {
    let report = optimize(
        &["le monde"],
        &["le grand monde", "le mondeux", "le monde est beau"],
        sequential(Algorithm::Greedy),
    );
    assert_eq!(report.coverage_map[0].sentence_indices, vec![2]);
    assert_eq!(report.selected_indices(), vec![2]);
}

#[test]
fn budget_stops_before_full_coverage() {
    for algorithm in ALL_ALGORITHMS {
        let config = OptimizerConfig {
            max_sentences: 1,
            ..sequential(algorithm)
        };
        let report = optimize(&["chat", "chien"], &["un chat", "un chien"], config);
        assert_eq!(report.summary.status, SelectionStatus::Stopped, "{}", algorithm);
        assert_eq!(report.selected_sentences.len(), 1);
        assert!(report.summary.coverage_percent < 100.0);
        assert_eq!(report.missing_ids(), vec![1]);
    }
}

#[test]
fn unreachable_words_exhaust_the_run() {
    let report = optimize(
        &["chat", "licorne"],
        &["un chat", "un autre chat"],
        sequential(Algorithm::Greedy),
    );
    assert_eq!(report.summary.status, SelectionStatus::Exhausted);
    assert_eq!(report.selected_indices(), vec![0]);
    assert_eq!(report.missing_vocabulary[0].canonical_text, "licorne");
}

#[test]
fn empty_inputs_give_trivial_reports() {
    let no_vocab = optimize(&[], &["un chat"], sequential(Algorithm::Greedy));
    assert_eq!(no_vocab.summary.coverage_percent, 100.0);
    assert_eq!(no_vocab.summary.sentences_selected, 0);
    assert_eq!(no_vocab.summary.status, SelectionStatus::Complete);

    let no_corpus = optimize(&["chat"], &[], sequential(Algorithm::Greedy));
    assert_eq!(no_corpus.summary.coverage_percent, 0.0);
    assert_eq!(no_corpus.summary.sentences_selected, 0);
    assert_eq!(no_corpus.missing_ids(), vec![0]);
}

#[test]
fn blank_sentences_cover_nothing() {
    let report = optimize(&["chat"], &["   ", "", "chat"], sequential(Algorithm::Greedy));
    assert_eq!(report.selected_indices(), vec![2]);
    assert!(report.coverage_map[0].sentence_indices == vec![2]);
}

#[test]
fn missing_list_is_exactly_the_unselected_words() {
    for algorithm in ALL_ALGORITHMS {
        for budget in 1..=4 {
            let config = OptimizerConfig {
                max_sentences: budget,
                ..sequential(algorithm)
            };
            let report = optimize_with(&french_vocabulary(), &french_sentences(), config, french_lemmas());
            let selected = report.selected_indices();
            let expected: Vec<_> = report
                .coverage_map
                .iter()
                .filter(|entry| !entry.sentence_indices.iter().any(|i| selected.contains(i)))
                .map(|entry| entry.vocab_id)
                .collect();
            assert_eq!(report.missing_ids(), expected, "{} with budget {}", algorithm, budget);
        }
    }
}
