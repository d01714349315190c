//! Case analysis: classifier, override rules, and report assembly

use ipcsense_classifiers::{build_classifier, PartyExtractor, SectionClassifier};
use ipcsense_core::{
    extract_case_description, extract_crime_type, normalize, AnalysisDebug, AnalysisFailure,
    AnalysisOutcome, AnalysisResult,
};
use ipcsense_policy::{explain, ConfidenceBand, OverrideEngine};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::AppConfig;

/// Message attached to every failure-shaped result
pub const FAILURE_MESSAGE: &str =
    "An error occurred during analysis. Please check if all model files are available.";

/// Number of classes reported in `debug.top_probs`
const TOP_CLASSES: usize = 3;

/// Runs one case submission through the full analysis pipeline
pub struct CaseAnalyzer {
    classifier: Arc<dyn SectionClassifier>,
    engine: OverrideEngine,
    parties: PartyExtractor,
}

impl CaseAnalyzer {
    pub fn new(
        classifier: Arc<dyn SectionClassifier>,
        engine: OverrideEngine,
        parties: PartyExtractor,
    ) -> Self {
        Self {
            classifier,
            engine,
            parties,
        }
    }

    /// Build the analyzer described by the configuration
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let classifier = build_classifier(&config.classifier)?;

        let engine = match &config.rules {
            Some(path) => {
                info!("Loading override rules from {}", path.display());
                OverrideEngine::from_file(path)?
            }
            None => OverrideEngine::ipc_default()?,
        };
        info!(
            "Override table '{}' with {} rules",
            engine.table_name(),
            engine.rules().len()
        );

        Ok(Self::new(classifier, engine, PartyExtractor::new()?))
    }

    /// Name of the statistical classifier
    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Analyze a submission.
    ///
    /// Never fails: classifier errors come back as a failure-shaped outcome
    /// carrying the submission, the error, and [`FAILURE_MESSAGE`].
    pub async fn analyze(&self, case_text: &str) -> AnalysisOutcome {
        metrics::counter!("ipcsense_analyses_total").increment(1);

        let description = extract_case_description(case_text);
        let prediction = match self.classifier.classify(&normalize(description)).await {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!("Classification failed: {}", e);
                metrics::counter!("ipcsense_analysis_errors_total").increment(1);
                return AnalysisOutcome::Failed(AnalysisFailure {
                    case_text: case_text.to_string(),
                    error: e.to_string(),
                    message: FAILURE_MESSAGE.to_string(),
                });
            }
        };
        metrics::histogram!("ipcsense_classify_latency_us").record(prediction.latency_us as f64);
        debug!(
            "Classifier '{}' predicted {} (index {})",
            self.classifier.name(),
            prediction.section,
            prediction.index
        );

        let crime_type = extract_crime_type(case_text);
        let decision = self
            .engine
            .decide(description, crime_type.as_deref(), &prediction.section);
        if let Some(rule) = &decision.rule {
            metrics::counter!("ipcsense_overrides_total", "rule" => rule.clone()).increment(1);
        }

        let confidence = prediction.confidence();
        let band = ConfidenceBand::from_confidence(confidence);
        debug!("Confidence {:.1}% ({})", confidence, band.as_str());

        AnalysisOutcome::Analyzed(AnalysisResult {
            case_text: case_text.to_string(),
            predicted_section: decision.section.clone(),
            confidence,
            parties: self.parties.extract(description),
            explanation: explain(&decision.section, description),
            recommendations: band.recommendation().to_string(),
            debug: AnalysisDebug {
                prediction_idx: prediction.index,
                original_section: prediction.section.clone(),
                final_section: decision.section,
                is_override: decision.is_override,
                top_probs: prediction.top_k(TOP_CLASSES),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ipcsense_core::{Error, Result, SectionCode, SectionPrediction};
    use std::sync::Mutex;

    /// Returns a fixed distribution and records the text it was given
    struct FixedClassifier {
        distribution: Vec<(SectionCode, f64)>,
        seen: Mutex<Vec<String>>,
    }

    impl FixedClassifier {
        fn new(entries: &[(&str, f64)]) -> Self {
            Self {
                distribution: entries
                    .iter()
                    .map(|(code, prob)| (SectionCode::from(*code), *prob))
                    .collect(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SectionClassifier for FixedClassifier {
        async fn classify(&self, text: &str) -> Result<SectionPrediction> {
            self.seen.lock().unwrap().push(text.to_string());
            SectionPrediction::from_distribution(self.distribution.clone())
                .ok_or_else(|| Error::classifier("empty distribution"))
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct MissingArtifacts;

    #[async_trait]
    impl SectionClassifier for MissingArtifacts {
        async fn classify(&self, _text: &str) -> Result<SectionPrediction> {
            Err(Error::artifact(
                "could not find model files in any of the expected locations",
            ))
        }

        fn name(&self) -> &str {
            "missing"
        }
    }

    fn analyzer(classifier: Arc<dyn SectionClassifier>) -> CaseAnalyzer {
        CaseAnalyzer::new(
            classifier,
            OverrideEngine::ipc_default().unwrap(),
            PartyExtractor::new().unwrap(),
        )
    }

    #[tokio::test]
    async fn test_self_defense_override() {
        let classifier = Arc::new(FixedClassifier::new(&[
            ("302", 0.45),
            ("304", 0.35),
            ("100", 0.2),
        ]));
        let submission = "Case Description: The accused, in self defense, killed the attacker person A";
        let outcome = analyzer(classifier.clone()).analyze(submission).await;

        let result = outcome.result().unwrap();
        assert_eq!(result.case_text, submission);
        assert_eq!(result.predicted_section, "100");
        assert!((result.confidence - 45.0).abs() < 1e-9);
        assert!(result.parties.contains(&"Person A".to_string()));
        assert!(result.explanation.starts_with("Self-Defense Analysis:"));
        assert!(result.recommendations.contains("Low confidence"));

        assert_eq!(result.debug.prediction_idx, 0);
        assert_eq!(result.debug.original_section, "302");
        assert_eq!(result.debug.final_section, "100");
        assert!(result.debug.is_override);
        assert_eq!(result.debug.top_probs.len(), 3);

        let seen = classifier.seen.lock().unwrap();
        assert_eq!(
            seen[0],
            "the accused in self defense killed the attacker person a"
        );
    }

    #[tokio::test]
    async fn test_theft_form_submission() {
        let classifier = Arc::new(FixedClassifier::new(&[("420", 0.9), ("379", 0.1)]));
        let outcome = analyzer(classifier)
            .analyze("Crime Type: Theft Location: Delhi Case Description: The man stole a phone")
            .await;

        let result = outcome.result().unwrap();
        assert_eq!(result.predicted_section, "379");
        assert!(result.debug.is_override);
        assert!(result.explanation.starts_with("Theft:"));
        assert!(result.recommendations.contains("Strong confidence"));
    }

    #[tokio::test]
    async fn test_no_override_keeps_prediction() {
        let classifier = Arc::new(FixedClassifier::new(&[("304A", 0.7), ("279", 0.3)]));
        let outcome = analyzer(classifier)
            .analyze("A truck driver ran over a pedestrian through rash driving")
            .await;

        let result = outcome.result().unwrap();
        assert_eq!(result.predicted_section, "304A");
        assert!(!result.debug.is_override);
        assert!(result.explanation.starts_with("Death by Negligence:"));
        assert!(result.recommendations.contains("Moderate confidence"));
        assert_eq!(result.debug.top_probs.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_artifacts_is_failure_shaped() {
        let outcome = analyzer(Arc::new(MissingArtifacts))
            .analyze("The man stole a phone")
            .await;

        assert!(outcome.is_error());
        assert_eq!(outcome.case_text(), "The man stole a phone");

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["message"], FAILURE_MESSAGE);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("could not find model files"));
        assert!(json.get("predicted_section").is_none());
    }
}
