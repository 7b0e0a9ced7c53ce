//! Invariants every strategy must hold on arbitrary corpora.

use std::collections::BTreeSet;

use lexcover::{
    select, NoProgress, OptimizerConfig, ProgressUpdate, SelectionStatus, Stage, VocabId,
};
use proptest::prelude::*;

use crate::common::{expected_uncovered, records, sequential, ALL_ALGORITHMS};

const VOCAB: usize = 12;

fn coverage_sets() -> impl Strategy<Value = Vec<Vec<VocabId>>> {
    prop::collection::vec(prop::collection::vec(0..VOCAB, 0..5), 0..14)
}

fn config_for(algorithm_index: usize, max_sentences: usize) -> OptimizerConfig {
    OptimizerConfig {
        max_sentences,
        beam_width: 3,
        beam_depth: 2,
        ..sequential(ALL_ALGORITHMS[algorithm_index])
    }
}

proptest! {
    #[test]
    fn missing_is_vocabulary_minus_union(
        sets in coverage_sets(),
        algorithm in 0usize..3,
        max_sentences in 1usize..6,
    ) {
        let sentences = records(&sets);
        let config = config_for(algorithm, max_sentences);
        let state = select(&sentences, VOCAB, &config, &mut NoProgress, None).unwrap();
        let chosen: Vec<usize> = state.selected().iter().map(|s| s.sentence_index).collect();

        prop_assert_eq!(state.uncovered().ids(), expected_uncovered(&sentences, &chosen, VOCAB));
        prop_assert!(chosen.len() <= max_sentences);
        prop_assert_eq!(chosen.iter().collect::<BTreeSet<_>>().len(), chosen.len());
    }

    #[test]
    fn newly_covered_sets_partition_the_covered_words(
        sets in coverage_sets(),
        algorithm in 0usize..3,
    ) {
        let sentences = records(&sets);
        let config = config_for(algorithm, 20);
        let state = select(&sentences, VOCAB, &config, &mut NoProgress, None).unwrap();

        let mut seen = BTreeSet::new();
        for selection in state.selected() {
            prop_assert!(!selection.newly_covered.is_empty());
            for &id in &selection.newly_covered {
                prop_assert!(sentences[selection.sentence_index].coverage.contains(&id));
                prop_assert!(seen.insert(id), "id {} covered twice", id);
            }
        }
        prop_assert_eq!(seen.len(), state.words_covered());
    }

    #[test]
    fn unbounded_run_reaches_everything_reachable(
        sets in coverage_sets(),
        algorithm in 0usize..3,
    ) {
        let sentences = records(&sets);
        let config = config_for(algorithm, 20);
        let state = select(&sentences, VOCAB, &config, &mut NoProgress, None).unwrap();
        let reachable: BTreeSet<VocabId> = sets.iter().flatten().copied().collect();

        prop_assert_eq!(state.words_covered(), reachable.len());
        let expected = if reachable.len() == VOCAB {
            SelectionStatus::Complete
        } else {
            SelectionStatus::Exhausted
        };
        prop_assert_eq!(state.status(), expected);
    }

    #[test]
    fn progress_is_monotone(sets in coverage_sets(), algorithm in 0usize..3) {
        let sentences = records(&sets);
        let config = OptimizerConfig {
            progress_interval_iterations: 1,
            ..config_for(algorithm, 20)
        };
        let mut updates: Vec<ProgressUpdate> = Vec::new();
        let mut sink = |u: &ProgressUpdate| updates.push(*u);
        let state = select(&sentences, VOCAB, &config, &mut sink, None).unwrap();

        let selecting: Vec<_> = updates.iter().filter(|u| u.stage != Stage::Analyzing).collect();
        for pair in selecting.windows(2) {
            prop_assert!(pair[0].words_covered <= pair[1].words_covered);
            prop_assert!(pair[0].sentences_selected <= pair[1].sentences_selected);
        }
        if let Some(last) = selecting.last() {
            prop_assert!(last.words_covered <= state.words_covered());
        }
    }

    #[test]
    fn beam_search_is_independent_of_parallelism(
        sets in coverage_sets(),
        width in 1usize..5,
        depth in 1usize..4,
    ) {
        let sentences = records(&sets);
        let base = OptimizerConfig {
            beam_width: width,
            beam_depth: depth,
            max_sentences: 6,
            ..sequential(lexcover::Algorithm::BeamSearch)
        };
        let threaded = OptimizerConfig {
            parallel: true,
            parallel_threshold: 0,
            worker_count: 3,
            ..base.clone()
        };
        let a = select(&sentences, VOCAB, &base, &mut NoProgress, None).unwrap();
        let b = select(&sentences, VOCAB, &threaded, &mut NoProgress, None).unwrap();
        prop_assert_eq!(a, b);
    }
}
