//! Classifier trait

use async_trait::async_trait;
use ipcsense_core::{Result, SectionPrediction};

/// Capability of mapping case text to a distribution over section codes.
///
/// Implementations receive text that has already been normalized with
/// [`ipcsense_core::normalize`].
#[async_trait]
pub trait SectionClassifier: Send + Sync {
    /// Classify the given text
    async fn classify(&self, text: &str) -> Result<SectionPrediction>;

    /// Get the classifier name
    fn name(&self) -> &str;
}
