//! ipcsense Classifiers
//!
//! Statistical section classifiers and text extractors used at inference time.
//!
//! Two backends implement the [`SectionClassifier`] capability:
//! - [`ArtifactClassifier`]: a TF-IDF vectorizer and linear model loaded from
//!   a serialized artifact set on disk
//! - [`KeywordClassifier`]: an artifact-free keyword table, useful when no
//!   trained model is available
//!
//! Both are treated as black-box oracles by the override policy: they map
//! text to a probability distribution over section codes and nothing more.
//!
//! The keyword table also drives [`suggest_sections`], a ranked list of
//! candidate sections with display text.

pub mod artifacts;
pub mod classifier;
pub mod config;
pub mod keyword;
pub mod linear;
pub mod parties;
pub mod registry;
pub mod suggestions;
pub mod vectorizer;

pub use artifacts::{ArtifactClassifier, ModelArtifacts, ModelManifest};
pub use classifier::SectionClassifier;
pub use config::{ClassifierBackend, ClassifierConfig};
pub use keyword::KeywordClassifier;
pub use linear::LinearModel;
pub use parties::PartyExtractor;
pub use registry::{build_classifier, load_config};
pub use suggestions::{default_suggestions, suggest_sections, SectionSuggestion};
pub use vectorizer::TfidfVectorizer;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::artifacts::ArtifactClassifier;
    pub use crate::classifier::SectionClassifier;
    pub use crate::keyword::KeywordClassifier;
    pub use crate::parties::PartyExtractor;
}
