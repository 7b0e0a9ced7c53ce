//! Vocabulary cache behavior as seen by a full run.

use std::fs;

use lexcover::{
    Algorithm, CoverError, DiskCache, NoProgress, NormalizeError, Normalizer, Optimizer,
    OptimizerConfig, SelectionStatus, SimpleNormalizer, TokenLemma,
};

use crate::common::{corpus, make_items, sequential};

/// A normalizer that can be taken offline while keeping its identity.
struct Switchable {
    online: bool,
}

impl Normalizer for Switchable {
    fn normalize(&self, text: &str) -> Result<Vec<TokenLemma>, NormalizeError> {
        if self.online {
            SimpleNormalizer::new().normalize(text)
        } else {
            Err(NormalizeError::Unavailable("service offline".to_string()))
        }
    }

    fn fingerprint(&self) -> String {
        "switchable-v1".to_string()
    }
}

fn optimizer(online: bool, dir: &std::path::Path) -> Optimizer<Switchable> {
    let config = OptimizerConfig {
        cache_enabled: true,
        ..sequential(Algorithm::Greedy)
    };
    Optimizer::new(config, Switchable { online })
        .unwrap()
        .with_cache(Box::new(DiskCache::new(dir)))
}

#[test]
fn disk_cache_survives_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let items = make_items(&["chat", "chien"]);
    let sentences = corpus(&["un chat", "un chien"]);

    let first = optimizer(true, dir.path())
        .run(&items, &sentences, &mut NoProgress, None)
        .unwrap();
    assert_eq!(first.summary.status, SelectionStatus::Complete);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

    // Vocabulary comes from disk; sentences can't be analyzed and cover nothing.
    let second = optimizer(false, dir.path())
        .run(&items, &sentences, &mut NoProgress, None)
        .unwrap();
    assert_eq!(second.summary.status, SelectionStatus::Exhausted);
    assert_eq!(second.summary.total_words, 2);
}

#[test]
fn cache_miss_with_offline_normalizer_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = optimizer(false, dir.path()).run(
        &make_items(&["chat"]),
        &corpus(&["un chat"]),
        &mut NoProgress,
        None,
    );
    assert!(matches!(result, Err(CoverError::DependencyUnavailable(_))));
}

#[test]
fn corrupt_cache_file_is_rebuilt() {
    let dir = tempfile::tempdir().unwrap();
    let items = make_items(&["chat"]);
    let sentences = corpus(&["un chat"]);
    optimizer(true, dir.path())
        .run(&items, &sentences, &mut NoProgress, None)
        .unwrap();

    let path = fs::read_dir(dir.path()).unwrap().next().unwrap().unwrap().path();
    let content = fs::read_to_string(&path).unwrap();
    fs::write(&path, content.replace("chat", "chien")).unwrap();

    let report = optimizer(true, dir.path())
        .run(&items, &sentences, &mut NoProgress, None)
        .unwrap();
    assert_eq!(report.summary.status, SelectionStatus::Complete);
}

#[test]
fn changing_the_list_misses_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    optimizer(true, dir.path())
        .run(&make_items(&["chat"]), &corpus(&["un chat"]), &mut NoProgress, None)
        .unwrap();
    let result = optimizer(false, dir.path()).run(
        &make_items(&["chat", "chien"]),
        &corpus(&["un chat"]),
        &mut NoProgress,
        None,
    );
    assert!(result.is_err());
}
