//! Same inputs, same output: across repeated runs and with or without the
//! worker pool.

use lexcover::{Algorithm, OptimizerConfig};

use crate::common::{
    french_lemmas, french_vocabulary, optimize_with, parallel, sequential, stable_view,
    ALL_ALGORITHMS,
};

fn generated_corpus(n: usize) -> Vec<String> {
    let subjects = ["Je", "Tu", "Le chat", "Nous", "Le monde", "Une maison"];
    let verbs = ["suis", "as", "est", "allons", "fais", "sont"];
    let tails = ["un chat.", "une maison.", "beau.", "faire quelque chose.", "ici.", "là."];
    (0..n)
        .map(|i| {
            format!(
                "{} {} {}",
                subjects[i % subjects.len()],
                verbs[(i / 3) % verbs.len()],
                tails[(i * 7) % tails.len()]
            )
        })
        .collect()
}

#[test]
fn repeated_runs_are_identical() {
    let corpus = generated_corpus(200);
    for algorithm in ALL_ALGORITHMS {
        let first = optimize_with(&french_vocabulary(), &corpus, sequential(algorithm), french_lemmas());
        let second = optimize_with(&french_vocabulary(), &corpus, sequential(algorithm), french_lemmas());
        assert_eq!(stable_view(&first), stable_view(&second), "{}", algorithm);
    }
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let corpus = generated_corpus(400);
    for algorithm in ALL_ALGORITHMS {
        let seq = optimize_with(&french_vocabulary(), &corpus, sequential(algorithm), french_lemmas());
        let par = optimize_with(&french_vocabulary(), &corpus, parallel(algorithm), french_lemmas());
        assert_eq!(stable_view(&seq), stable_view(&par), "{}", algorithm);
    }
}

#[test]
fn worker_count_does_not_matter() {
    let corpus = generated_corpus(300);
    let base = parallel(Algorithm::BeamSearch);
    let reports: Vec<String> = [1, 2, 3, 8]
        .into_iter()
        .map(|workers| {
            let config = OptimizerConfig {
                worker_count: workers,
                ..base.clone()
            };
            stable_view(&optimize_with(&french_vocabulary(), &corpus, config, french_lemmas()))
        })
        .collect();
    assert!(reports.windows(2).all(|w| w[0] == w[1]));
}
