//! Classifier construction from configuration

use crate::{ArtifactClassifier, ClassifierBackend, ClassifierConfig, KeywordClassifier, SectionClassifier};
use ipcsense_core::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Build the configured classifier backend.
///
/// Artifact-backed classifiers do not touch the filesystem here; their
/// artifacts are loaded on first use so that a missing model surfaces as a
/// per-request failure rather than a startup error.
pub fn build_classifier(config: &ClassifierConfig) -> Result<Arc<dyn SectionClassifier>> {
    match &config.backend {
        ClassifierBackend::Artifacts { search_paths } => {
            info!(
                "Using artifact classifier (search paths: {})",
                search_paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            Ok(Arc::new(ArtifactClassifier::new(search_paths.clone())))
        }
        ClassifierBackend::Keyword => {
            let classifier = KeywordClassifier::with_default_table()?;
            info!(
                "Using keyword classifier with {} sections",
                classifier.sections().len()
            );
            Ok(Arc::new(classifier))
        }
    }
}

/// Load classifier configuration from file
pub fn load_config(path: impl AsRef<Path>) -> Result<ClassifierConfig> {
    ClassifierConfig::from_file(path.as_ref()).map_err(|e| {
        ipcsense_core::Error::config(format!("Failed to load classifier config: {}", e))
    })
}
