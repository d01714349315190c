//! Core types for ipcsense

use serde::{Deserialize, Serialize};
use std::fmt;

/// A statutory section code such as `"302"` or `"304A"`
///
/// Deserializes from either a string or a bare integer, so hand-written YAML
/// such as `section: 302` is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SectionCode(String);

impl<'de> Deserialize<'de> for SectionCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawCode {
            Text(String),
            Number(u64),
        }

        Ok(match RawCode::deserialize(deserializer)? {
            RawCode::Text(code) => Self::new(code),
            RawCode::Number(code) => Self(code.to_string()),
        })
    }
}

impl SectionCode {
    /// Create a section code, trimming surrounding whitespace
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.len() == code.len() {
            Self(code)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the code is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for SectionCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl PartialEq<str> for SectionCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Output of a statistical classifier for one case text
#[derive(Debug, Clone, PartialEq)]
pub struct SectionPrediction {
    /// Index of the predicted class in `distribution`
    pub index: usize,

    /// Predicted section code
    pub section: SectionCode,

    /// Per-class probabilities (0.0-1.0) in class order
    pub distribution: Vec<(SectionCode, f64)>,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl SectionPrediction {
    /// Build a prediction from a distribution by taking its arg-max.
    ///
    /// Ties resolve to the lowest class index. Returns `None` for an empty
    /// distribution.
    pub fn from_distribution(distribution: Vec<(SectionCode, f64)>) -> Option<Self> {
        let (index, (section, _)) = distribution
            .iter()
            .enumerate()
            .fold(None::<(usize, &(SectionCode, f64))>, |best, (idx, entry)| match best {
                Some((_, (_, best_prob))) if *best_prob >= entry.1 => best,
                _ => Some((idx, entry)),
            })?;

        let section = section.clone();
        Some(Self {
            index,
            section,
            distribution,
            latency_us: 0,
        })
    }

    /// Probability of the predicted class as a percentage (0-100)
    pub fn confidence(&self) -> f64 {
        self.distribution
            .get(self.index)
            .map(|(_, prob)| prob * 100.0)
            .unwrap_or(0.0)
    }

    /// The `k` most probable classes as (section, percentage), descending.
    ///
    /// Equal probabilities keep class order.
    pub fn top_k(&self, k: usize) -> Vec<(SectionCode, f64)> {
        let mut ranked: Vec<_> = self.distribution.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranked
            .into_iter()
            .take(k)
            .map(|(section, prob)| (section.clone(), prob * 100.0))
            .collect()
    }

    /// Attach a measured latency
    pub fn with_latency(mut self, latency_us: u64) -> Self {
        self.latency_us = latency_us;
        self
    }
}

/// Diagnostic block attached to every successful analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDebug {
    /// Raw class index chosen by the statistical classifier
    pub prediction_idx: usize,

    /// Section chosen by the statistical classifier
    pub original_section: SectionCode,

    /// Section reported to the caller
    pub final_section: SectionCode,

    /// Whether an override rule replaced the statistical section
    pub is_override: bool,

    /// Top classes as `[section, percentage]` pairs
    pub top_probs: Vec<(SectionCode, f64)>,
}

/// Successful analysis of a case submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The submission exactly as received
    pub case_text: String,

    /// Final section after override rules
    pub predicted_section: SectionCode,

    /// Statistical confidence (0-100) of the classifier's own prediction
    pub confidence: f64,

    /// Parties mentioned in the description
    pub parties: Vec<String>,

    /// Explanation of the applicable section
    pub explanation: String,

    /// Confidence-banded recommendation text
    pub recommendations: String,

    /// Diagnostics
    pub debug: AnalysisDebug,
}

/// Failure-shaped analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    /// The submission exactly as received
    pub case_text: String,

    /// Underlying error description
    pub error: String,

    /// User-facing message
    pub message: String,
}

/// Either a full analysis or a failure-shaped result; never a partial one.
///
/// Serialized untagged, so callers see exactly one of the two JSON shapes and
/// must check for an `error` key before trusting `predicted_section`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Analyzed(AnalysisResult),
    Failed(AnalysisFailure),
}

impl AnalysisOutcome {
    /// Whether this outcome is failure-shaped
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The successful result, if any
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Analyzed(result) => Some(result),
            Self::Failed(_) => None,
        }
    }

    /// The submission text carried by either shape
    pub fn case_text(&self) -> &str {
        match self {
            Self::Analyzed(result) => &result.case_text,
            Self::Failed(failure) => &failure.case_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(entries: &[(&str, f64)]) -> Vec<(SectionCode, f64)> {
        entries
            .iter()
            .map(|(code, prob)| (SectionCode::from(*code), *prob))
            .collect()
    }

    #[test]
    fn test_section_code_trims() {
        let code = SectionCode::new(" 304A ");
        assert_eq!(code.as_str(), "304A");
        assert_eq!(code, "304A");
    }

    #[test]
    fn test_section_code_from_number() {
        let code: SectionCode = serde_json::from_str("302").unwrap();
        assert_eq!(code, "302");

        let code: SectionCode = serde_json::from_str("\"304A\"").unwrap();
        assert_eq!(code, "304A");
    }

    #[test]
    fn test_prediction_argmax_and_confidence() {
        let prediction =
            SectionPrediction::from_distribution(dist(&[("302", 0.2), ("379", 0.7), ("420", 0.1)]))
                .unwrap();

        assert_eq!(prediction.index, 1);
        assert_eq!(prediction.section, "379");
        assert!((prediction.confidence() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_prediction_argmax_tie_takes_first() {
        let prediction =
            SectionPrediction::from_distribution(dist(&[("302", 0.5), ("379", 0.5)])).unwrap();
        assert_eq!(prediction.index, 0);
    }

    #[test]
    fn test_prediction_empty_distribution() {
        assert!(SectionPrediction::from_distribution(Vec::new()).is_none());
    }

    #[test]
    fn test_top_k_descending() {
        let prediction = SectionPrediction::from_distribution(dist(&[
            ("302", 0.1),
            ("379", 0.5),
            ("420", 0.3),
            ("323", 0.1),
        ]))
        .unwrap();

        let top = prediction.top_k(3);
        let codes: Vec<_> = top.iter().map(|(code, _)| code.as_str()).collect();
        assert_eq!(codes, vec!["379", "420", "302"]);
        assert!((top[0].1 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_outcome_json_shapes() {
        let failure = AnalysisOutcome::Failed(AnalysisFailure {
            case_text: "text".to_string(),
            error: "artifact error: missing".to_string(),
            message: "check files".to_string(),
        });

        let json = serde_json::to_value(&failure).unwrap();
        assert!(json.get("error").is_some());
        assert!(json.get("predicted_section").is_none());

        let parsed: AnalysisOutcome = serde_json::from_value(json).unwrap();
        assert!(parsed.is_error());
    }

    #[test]
    fn test_debug_top_probs_serialize_as_pairs() {
        let debug = AnalysisDebug {
            prediction_idx: 2,
            original_section: "302".into(),
            final_section: "100".into(),
            is_override: true,
            top_probs: vec![("302".into(), 45.0)],
        };

        let json = serde_json::to_value(&debug).unwrap();
        assert_eq!(json["top_probs"][0][0], "302");
        assert_eq!(json["top_probs"][0][1], 45.0);
    }
}
