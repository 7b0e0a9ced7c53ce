//! Token, lemma and phrase channels end to end.

use lexcover::{
    analyze_text, preprocess_vocabulary, Algorithm, MatchingIndex, NoCache, OptimizerConfig,
    SimpleNormalizer, VocabId,
};

use crate::common::{french_lemmas, french_vocabulary, make_items, optimize_with, corpus, sequential};

fn coverage(index: &MatchingIndex, normalizer: &SimpleNormalizer, text: &str) -> Vec<VocabId> {
    let sentence = analyze_text(normalizer, text).unwrap();
    index.query(&sentence).into_iter().collect()
}

#[test]
fn french_sentences_cover_expected_entries() {
    let normalizer = french_lemmas();
    let entries = preprocess_vocabulary(&french_vocabulary(), &normalizer, &NoCache).unwrap();
    let index = MatchingIndex::build(&entries, true);

    // 0 être, 1 un|une, 2 le monde, 3 avoir, 4 chat, 5 maison, 6 aller, 7 faire
    assert_eq!(coverage(&index, &normalizer, "Je suis un étudiant."), vec![0, 1]);
    assert_eq!(coverage(&index, &normalizer, "Le monde est beau."), vec![0, 2]);
    assert_eq!(
        coverage(&index, &normalizer, "J'ai une maison et un chat."),
        vec![1, 3, 4, 5]
    );
    assert_eq!(
        coverage(&index, &normalizer, "Nous allons faire quelque chose."),
        vec![6, 7]
    );
    assert_eq!(
        coverage(&index, &normalizer, "Les chats sont dans la maison."),
        vec![0, 4, 5]
    );
}

#[test]
fn exact_match_turns_lemmas_off() {
    let items = french_vocabulary();
    let sentences = corpus(&["Je suis là.", "Être ou ne pas être."]);

    let lemmas = optimize_with(&items, &sentences, sequential(Algorithm::Greedy), french_lemmas());
    assert_eq!(lemmas.coverage_map[0].sentence_indices, vec![0, 1]);

    let config = OptimizerConfig {
        exact_match: true,
        ..sequential(Algorithm::Greedy)
    };
    let exact = optimize_with(&items, &sentences, config, french_lemmas());
    assert_eq!(exact.coverage_map[0].sentence_indices, vec![1]);
}

#[test]
fn lemma_matching_flag_turns_lemmas_off() {
    let config = OptimizerConfig {
        lemma_matching: false,
        ..sequential(Algorithm::Greedy)
    };
    let report = optimize_with(
        &make_items(&["aller"]),
        &corpus(&["Nous allons au marché."]),
        config,
        french_lemmas(),
    );
    assert!(report.coverage_map[0].sentence_indices.is_empty());
}

#[test]
fn matching_ignores_case_and_composition() {
    let normalizer = SimpleNormalizer::new();
    let entries =
        preprocess_vocabulary(&make_items(&["Été", "le monde"]), &normalizer, &NoCache).unwrap();
    let index = MatchingIndex::build(&entries, true);
    // Decomposed "e\u{301}" composes to "é" before matching.
    assert_eq!(coverage(&index, &normalizer, "L'E\u{301}TÉ arrive"), vec![0]);
    assert_eq!(coverage(&index, &normalizer, "LE MONDE entier"), vec![1]);
}

#[test]
fn phrase_variants_match_independently() {
    let normalizer = SimpleNormalizer::new();
    let entries = preprocess_vocabulary(
        &make_items(&["au revoir|à bientôt", "bientôt"]),
        &normalizer,
        &NoCache,
    )
    .unwrap();
    let index = MatchingIndex::build(&entries, true);
    assert_eq!(coverage(&index, &normalizer, "À bientôt, Marie"), vec![0, 1]);
    assert_eq!(coverage(&index, &normalizer, "Au revoir !"), vec![0]);
    // A phrase's words alone never match it.
    assert_eq!(coverage(&index, &normalizer, "Je reviens bientôt"), vec![1]);
}

#[test]
fn repeated_queries_are_identical() {
    let normalizer = french_lemmas();
    let entries = preprocess_vocabulary(&french_vocabulary(), &normalizer, &NoCache).unwrap();
    let index = MatchingIndex::build(&entries, true);
    let text = "Le monde est beau et j'ai un chat.";
    assert_eq!(coverage(&index, &normalizer, text), coverage(&index, &normalizer, text));
}
