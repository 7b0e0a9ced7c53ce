//! Match explanations agree with coverage.

use lexcover::{
    analyze_text, preprocess_vocabulary, MatchChannel, MatchingIndex, NoCache,
};

use crate::common::{french_lemmas, french_sentences, french_vocabulary};

#[test]
fn explanation_verdicts_match_queries() {
    let normalizer = french_lemmas();
    let entries = preprocess_vocabulary(&french_vocabulary(), &normalizer, &NoCache).unwrap();
    let index = MatchingIndex::build(&entries, true);

    for text in french_sentences() {
        let sentence = analyze_text(&normalizer, &text).unwrap();
        let covered = index.query(&sentence);
        for entry in &entries {
            let detail = index.explain(entry, &sentence);
            assert_eq!(detail.found, covered.contains(&entry.id), "{} in {:?}", entry.canonical_text, text);
            assert_eq!(detail.found, detail.channel.is_some());
        }
    }
}

#[test]
fn channels_are_reported() {
    let normalizer = french_lemmas();
    let entries = preprocess_vocabulary(&french_vocabulary(), &normalizer, &NoCache).unwrap();
    let index = MatchingIndex::build(&entries, true);
    let sentence = analyze_text(&normalizer, "Le monde est beau, j'ai un chat.").unwrap();

    let channel = |id: usize| index.explain(&entries[id], &sentence).channel;
    assert_eq!(channel(2), Some(MatchChannel::Phrase));
    assert_eq!(channel(4), Some(MatchChannel::Token));
    assert_eq!(channel(0), Some(MatchChannel::Lemma));
    assert_eq!(channel(5), None);
}
