//! Strategies and matchers checked against naive reimplementations.

use std::collections::BTreeSet;

use lexcover::{
    select, Algorithm, CoverageSet, NoProgress, OptimizerConfig, PhraseMatcher, SentenceRecord,
    VocabId,
};
use proptest::prelude::*;

use crate::common::{records, sequential};

/// Textbook greedy: rescan everything each step, lowest index on ties.
fn greedy_oracle(sentences: &[SentenceRecord], vocab_size: usize, budget: usize) -> Vec<usize> {
    let mut uncovered: BTreeSet<VocabId> = (0..vocab_size).collect();
    let mut chosen = Vec::new();
    while chosen.len() < budget && !uncovered.is_empty() {
        let mut best: Option<(usize, usize)> = None;
        for (i, s) in sentences.iter().enumerate() {
            if chosen.contains(&i) {
                continue;
            }
            let gain = s.coverage.iter().filter(|id| uncovered.contains(id)).count();
            if gain > 0 && best.map_or(true, |(_, g)| gain > g) {
                best = Some((i, gain));
            }
        }
        let Some((i, _)) = best else { break };
        for id in &sentences[i].coverage {
            uncovered.remove(id);
        }
        chosen.push(i);
    }
    chosen
}

fn word() -> impl Strategy<Value = String> {
    "[a-c]{1,2}"
}

proptest! {
    #[test]
    fn greedy_matches_full_rescan(
        sets in prop::collection::vec(prop::collection::vec(0usize..10, 0..5), 0..16),
        budget in 1usize..8,
    ) {
        let sentences = records(&sets);
        let config = OptimizerConfig {
            max_sentences: budget,
            ..sequential(Algorithm::Greedy)
        };
        let state = select(&sentences, 10, &config, &mut NoProgress, None).unwrap();
        let order: Vec<usize> = state.selected().iter().map(|s| s.sentence_index).collect();
        prop_assert_eq!(order, greedy_oracle(&sentences, 10, budget));
    }

    #[test]
    fn phrase_match_is_a_token_window(
        sentence in prop::collection::vec(word(), 0..8),
        pattern in prop::collection::vec(word(), 1..4),
    ) {
        let mut matcher = PhraseMatcher::new();
        matcher.push(pattern.join(" "), 0);
        let mut found = CoverageSet::new();
        matcher.collect_matches(&sentence.join(" "), &mut found);

        let expected = sentence.windows(pattern.len()).any(|w| w == pattern.as_slice());
        prop_assert_eq!(found.contains(&0), expected);
    }
}
