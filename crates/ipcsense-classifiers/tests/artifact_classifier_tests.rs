//! Artifact loading and inference tests
//!
//! Writes small artifact sets into temporary directories and exercises the
//! search order, validation, and lazy loading of `ArtifactClassifier`.

use ipcsense_classifiers::{ArtifactClassifier, ModelArtifacts, SectionClassifier};
use ipcsense_core::{normalize, Error};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Three-class model: 302 (kill, murdered), 379 (stole, phone), 420 (cheated)
fn write_artifacts(dir: &Path) {
    fs::write(
        dir.join("model_config.json"),
        json!({
            "model_type": "tfidf-logreg",
            "num_classes": 3,
            "classes": ["302", "379", "420"],
            "accuracy": 0.87
        })
        .to_string(),
    )
    .unwrap();

    fs::write(
        dir.join("vectorizer.json"),
        json!({
            "vocabulary": {"killed": 0, "murdered": 1, "stole": 2, "phone": 3, "cheated": 4},
            "idf": [1.5, 2.0, 1.2, 1.8, 2.2],
            "ngram_range": [1, 1],
            "sublinear_tf": true
        })
        .to_string(),
    )
    .unwrap();

    fs::write(
        dir.join("label_encoder.json"),
        json!({"classes": ["302", "379", "420"]}).to_string(),
    )
    .unwrap();

    fs::write(
        dir.join("classifier.json"),
        json!({
            "coef": [
                [4.0, 4.0, 0.0, 0.0, 0.0],
                [0.0, 0.0, 4.0, 4.0, 0.0],
                [0.0, 0.0, 0.0, 0.0, 4.0]
            ],
            "intercept": [0.1, 0.0, -0.1]
        })
        .to_string(),
    )
    .unwrap();
}

#[tokio::test]
async fn test_artifact_prediction() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path());

    let classifier = ArtifactClassifier::new(vec![dir.path().to_path_buf()]);

    let text = normalize("The man stole a phone from the market.");
    let prediction = classifier.classify(&text).await.unwrap();
    assert_eq!(prediction.section, "379");
    assert_eq!(prediction.index, 1);
    assert!(prediction.confidence() > 60.0);

    let total: f64 = prediction.distribution.iter().map(|(_, p)| p).sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_unknown_text_falls_back_to_intercepts() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path());

    let classifier = ArtifactClassifier::new(vec![dir.path().to_path_buf()]);
    let prediction = classifier.classify("").await.unwrap();

    // Highest intercept wins when no feature fires
    assert_eq!(prediction.section, "302");
    assert!(prediction.confidence() < 50.0);
}

#[tokio::test]
async fn test_search_order_first_complete_directory_wins() {
    let incomplete = TempDir::new().unwrap();
    fs::write(incomplete.path().join("model_config.json"), "{}").unwrap();

    let complete = TempDir::new().unwrap();
    write_artifacts(complete.path());

    let found = ModelArtifacts::locate(&[
        incomplete.path().to_path_buf(),
        complete.path().to_path_buf(),
    ])
    .unwrap();
    assert_eq!(found, complete.path());
}

#[tokio::test]
async fn test_missing_artifacts_is_artifact_error() {
    let empty = TempDir::new().unwrap();
    let classifier = ArtifactClassifier::new(vec![empty.path().to_path_buf()]);

    let err = classifier.classify("the man stole a phone").await.unwrap_err();
    assert!(matches!(err, Error::Artifact(_)));
    assert!(err.to_string().contains("could not find model files"));
}

#[tokio::test]
async fn test_failed_load_is_retried_on_next_call() {
    let dir = TempDir::new().unwrap();
    let classifier = ArtifactClassifier::new(vec![dir.path().to_path_buf()]);

    assert!(classifier.classify("stole").await.is_err());

    write_artifacts(dir.path());
    let prediction = classifier.classify("stole").await.unwrap();
    assert_eq!(prediction.section, "379");
}

#[test]
fn test_class_list_mismatch_rejected() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path());
    fs::write(
        dir.path().join("label_encoder.json"),
        json!({"classes": ["302", "379", "406"]}).to_string(),
    )
    .unwrap();

    let err = ModelArtifacts::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Artifact(_)));
}

#[test]
fn test_weight_width_mismatch_rejected() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path());
    fs::write(
        dir.path().join("classifier.json"),
        json!({
            "coef": [[1.0], [1.0], [1.0]],
            "intercept": [0.0, 0.0, 0.0]
        })
        .to_string(),
    )
    .unwrap();

    let err = ModelArtifacts::load_from_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("columns"));
}

#[test]
fn test_malformed_json_rejected() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path());
    fs::write(dir.path().join("vectorizer.json"), "not json").unwrap();

    let err = ModelArtifacts::load_from_dir(dir.path()).unwrap_err();
    assert!(err.to_string().contains("vectorizer.json"));
}

#[tokio::test]
async fn test_preloaded_artifacts() {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path());

    let artifacts = ModelArtifacts::load_from_dir(dir.path()).unwrap();
    assert_eq!(artifacts.manifest.accuracy, 0.87);

    let classifier = ArtifactClassifier::from_artifacts(artifacts);
    fs::remove_dir_all(dir.path()).unwrap();

    let prediction = classifier.classify("cheated").await.unwrap();
    assert_eq!(prediction.section, "420");
}
