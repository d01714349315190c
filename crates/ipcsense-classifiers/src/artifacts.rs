//! Serialized model artifact set and the classifier backed by it
//!
//! An artifact set is a directory holding four JSON files produced by an
//! offline training run:
//!
//! | file | contents |
//! |---|---|
//! | `model_config.json` | model type, class list, held-out accuracy |
//! | `vectorizer.json` | [`TfidfVectorizer`] |
//! | `label_encoder.json` | class index to section code |
//! | `classifier.json` | [`LinearModel`] |
//!
//! Directories are searched in order and the first one holding all four files
//! wins.

use crate::classifier::SectionClassifier;
use crate::linear::LinearModel;
use crate::vectorizer::TfidfVectorizer;
use async_trait::async_trait;
use ipcsense_core::{Error, Result, SectionCode, SectionPrediction};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;
use tracing::{debug, info};

pub const MODEL_CONFIG_FILE: &str = "model_config.json";
pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";

const ARTIFACT_FILES: [&str; 4] = [
    MODEL_CONFIG_FILE,
    VECTORIZER_FILE,
    LABEL_ENCODER_FILE,
    CLASSIFIER_FILE,
];

/// Contents of `model_config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    /// Free-form model family description
    #[serde(default)]
    pub model_type: String,

    /// Declared class count (0 when not recorded)
    #[serde(default)]
    pub num_classes: usize,

    /// Class list in encoder order
    pub classes: Vec<SectionCode>,

    /// Held-out accuracy reported by training (0.0-1.0)
    #[serde(default)]
    pub accuracy: f64,
}

/// Contents of `label_encoder.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LabelEncoder {
    classes: Vec<SectionCode>,
}

/// A loaded and validated artifact set
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    /// Directory the artifacts were loaded from
    pub dir: PathBuf,

    /// Model manifest
    pub manifest: ModelManifest,

    /// Text vectorizer
    pub vectorizer: TfidfVectorizer,

    /// Section code per class index
    pub classes: Vec<SectionCode>,

    /// Linear classification model
    pub model: LinearModel,
}

impl ModelArtifacts {
    /// Find the first directory in `search_paths` holding a complete artifact set
    pub fn locate(search_paths: &[PathBuf]) -> Result<PathBuf> {
        search_paths
            .iter()
            .find(|dir| ARTIFACT_FILES.iter().all(|file| dir.join(file).is_file()))
            .cloned()
            .ok_or_else(|| {
                Error::artifact(format!(
                    "could not find model files in any of the expected locations: {}",
                    search_paths
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }

    /// Locate and load an artifact set
    pub fn load(search_paths: &[PathBuf]) -> Result<Self> {
        let dir = Self::locate(search_paths)?;
        Self::load_from_dir(dir)
    }

    /// Load and validate an artifact set from a specific directory
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        debug!("Loading model artifacts from {}", dir.display());

        let manifest: ModelManifest = read_json(&dir.join(MODEL_CONFIG_FILE))?;
        let vectorizer: TfidfVectorizer = read_json(&dir.join(VECTORIZER_FILE))?;
        let encoder: LabelEncoder = read_json(&dir.join(LABEL_ENCODER_FILE))?;
        let model: LinearModel = read_json(&dir.join(CLASSIFIER_FILE))?;

        let artifacts = Self {
            dir: dir.to_path_buf(),
            manifest,
            vectorizer,
            classes: encoder.classes,
            model,
        };
        artifacts.validate()?;

        info!(
            "Loaded {} model with {} classes and {} features from {} (accuracy {:.2})",
            if artifacts.manifest.model_type.is_empty() {
                "linear"
            } else {
                artifacts.manifest.model_type.as_str()
            },
            artifacts.classes.len(),
            artifacts.vectorizer.n_features(),
            artifacts.dir.display(),
            artifacts.manifest.accuracy
        );

        Ok(artifacts)
    }

    fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(Error::artifact("label encoder has no classes"));
        }

        if self.manifest.classes != self.classes {
            return Err(Error::artifact(
                "class list in model_config.json does not match label_encoder.json",
            ));
        }

        if self.manifest.num_classes != 0 && self.manifest.num_classes != self.classes.len() {
            return Err(Error::artifact(format!(
                "model_config.json declares {} classes but lists {}",
                self.manifest.num_classes,
                self.classes.len()
            )));
        }

        self.vectorizer.validate()?;
        self.model
            .validate(self.classes.len(), self.vectorizer.n_features())
    }

    /// Run the vectorizer and model over normalized text
    pub fn predict(&self, text: &str) -> Result<SectionPrediction> {
        let row = self.vectorizer.transform(text);
        let probabilities = self.model.predict_proba(&row);

        let distribution = self
            .classes
            .iter()
            .cloned()
            .zip(probabilities)
            .collect::<Vec<_>>();

        SectionPrediction::from_distribution(distribution)
            .ok_or_else(|| Error::classifier("model produced an empty distribution"))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::artifact(format!("failed to read {}: {}", path.display(), e)))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::artifact(format!("failed to parse {}: {}", path.display(), e)))
}

/// Classifier backed by an on-disk artifact set.
///
/// Artifacts are loaded on first use and cached once loaded. A failed load is
/// not cached, so artifacts that appear later are picked up by the next call.
pub struct ArtifactClassifier {
    name: String,
    search_paths: Vec<PathBuf>,
    artifacts: OnceCell<Arc<ModelArtifacts>>,
}

impl ArtifactClassifier {
    /// Create a classifier that searches the given directories in order
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            name: "artifacts".to_string(),
            search_paths,
            artifacts: OnceCell::new(),
        }
    }

    /// Create a classifier from artifacts that are already loaded
    pub fn from_artifacts(artifacts: ModelArtifacts) -> Self {
        let search_paths = vec![artifacts.dir.clone()];
        Self {
            name: "artifacts".to_string(),
            search_paths,
            artifacts: OnceCell::new_with(Some(Arc::new(artifacts))),
        }
    }

    /// Directories searched for an artifact set
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Load (or return the cached) artifact set
    pub async fn artifacts(&self) -> Result<Arc<ModelArtifacts>> {
        self.artifacts
            .get_or_try_init(|| async {
                let paths = self.search_paths.clone();
                tokio::task::spawn_blocking(move || ModelArtifacts::load(&paths))
                    .await
                    .map_err(|e| Error::internal(format!("artifact loader panicked: {}", e)))?
                    .map(Arc::new)
            })
            .await
            .cloned()
    }
}

#[async_trait]
impl SectionClassifier for ArtifactClassifier {
    async fn classify(&self, text: &str) -> Result<SectionPrediction> {
        let artifacts = self.artifacts().await?;

        let start = Instant::now();
        let prediction = artifacts.predict(text)?;
        Ok(prediction.with_latency(start.elapsed().as_micros() as u64))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
