//! Cooperative cancellation and the iteration cap.

use lexcover::{
    Algorithm, CancellationToken, Optimizer, OptimizerConfig, ProgressUpdate, SelectionStatus,
    SimpleNormalizer, Stage,
};

use crate::common::{corpus, make_items, sequential};

fn one_word_per_sentence(n: usize) -> (Vec<String>, Vec<String>) {
    let forms: Vec<String> = (0..n).map(|i| format!("mot{}", i)).collect();
    let sentences = forms.iter().map(|f| format!("voici {}", f)).collect();
    (forms, sentences)
}

#[test]
fn cancelled_run_keeps_committed_selections() {
    let (forms, sentences) = one_word_per_sentence(20);
    let forms: Vec<&str> = forms.iter().map(String::as_str).collect();
    let config = OptimizerConfig {
        progress_interval_iterations: 1,
        ..sequential(Algorithm::Greedy)
    };
    let optimizer = Optimizer::new(config, SimpleNormalizer::new()).unwrap();

    let token = CancellationToken::new();
    let trigger = token.clone();
    let mut sink = |u: &ProgressUpdate| {
        if u.stage == Stage::Greedy && u.sentences_selected == 5 {
            trigger.cancel();
        }
    };
    let report = optimizer
        .run(&make_items(&forms), &sentences, &mut sink, Some(&token))
        .unwrap();

    assert_eq!(report.summary.status, SelectionStatus::Stopped);
    assert_eq!(report.selected_indices(), vec![0, 1, 2, 3, 4]);
    assert_eq!(report.missing_vocabulary.len(), 15);
}

#[test]
fn cancellation_during_beam_commits_nothing() {
    let (forms, sentences) = one_word_per_sentence(10);
    let forms: Vec<&str> = forms.iter().map(String::as_str).collect();
    let config = OptimizerConfig {
        beam_depth: 4,
        progress_interval_iterations: 1,
        ..sequential(Algorithm::BeamSearch)
    };
    let optimizer = Optimizer::new(config, SimpleNormalizer::new()).unwrap();

    let token = CancellationToken::new();
    let trigger = token.clone();
    let mut sink = |u: &ProgressUpdate| {
        if u.stage == Stage::BeamSearch {
            trigger.cancel();
        }
    };
    let report = optimizer
        .run(&make_items(&forms), &sentences, &mut sink, Some(&token))
        .unwrap();

    assert_eq!(report.summary.status, SelectionStatus::Stopped);
    assert!(report.selected_sentences.is_empty());
    assert_eq!(report.summary.iterations, 1);
}

#[test]
fn iteration_cap_stops_every_strategy() {
    let (forms, sentences) = one_word_per_sentence(8);
    let forms: Vec<&str> = forms.iter().map(String::as_str).collect();
    for algorithm in [Algorithm::Greedy, Algorithm::WeightedGreedy] {
        let config = OptimizerConfig {
            max_iterations: 3,
            ..sequential(algorithm)
        };
        let optimizer = Optimizer::new(config, SimpleNormalizer::new()).unwrap();
        let report = optimizer
            .run(&make_items(&forms), &corpus(&[]), &mut lexcover::NoProgress, None)
            .unwrap();
        // Empty corpus: exhausted on the first iteration, well under the cap.
        assert_eq!(report.summary.status, SelectionStatus::Exhausted);

        let report = optimizer
            .run(&make_items(&forms), &sentences, &mut lexcover::NoProgress, None)
            .unwrap();
        assert_eq!(report.summary.status, SelectionStatus::Stopped, "{}", algorithm);
        assert_eq!(report.summary.iterations, 3);
        assert_eq!(report.selected_sentences.len(), 3);
    }
}
