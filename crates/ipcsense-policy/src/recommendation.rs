//! Confidence-banded recommendations

use serde::{Deserialize, Serialize};

/// Confidence band of a statistical prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    /// Above 80%
    Strong,
    /// Above 60% up to 80%
    Moderate,
    /// 60% or below
    Low,
}

impl ConfidenceBand {
    /// Band for a confidence percentage (0-100).
    ///
    /// The bounds are exclusive on the low side: exactly 80 is moderate and
    /// exactly 60 is low. NaN falls through to `Low`.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 80.0 {
            Self::Strong
        } else if confidence > 60.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Recommendation text for this band
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Strong => STRONG,
            Self::Moderate => MODERATE,
            Self::Low => LOW,
        }
    }

    /// Short label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }
}

const STRONG: &str = "Recommendations:
- Strong confidence in legal analysis
- Recommended to proceed with legal proceedings under the identified section
- Document all evidence thoroughly";

const MODERATE: &str = "Recommendations:
- Moderate confidence in legal analysis
- Further investigation and evidence gathering recommended
- Consider consulting a legal expert for case-specific advice";

const LOW: &str = "Recommendations:
- Low confidence in automated analysis
- Consult legal experts for detailed evaluation
- Consider gathering more case details and evidence
- Complex case may involve multiple legal provisions";

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ConfidenceBand::from_confidence(85.0), ConfidenceBand::Strong);
        assert_eq!(ConfidenceBand::from_confidence(80.0), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_confidence(60.0001), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_confidence(60.0), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_confidence(0.0), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_confidence(f64::NAN), ConfidenceBand::Low);
    }

    #[test]
    fn test_templates_are_distinct() {
        let strong = ConfidenceBand::Strong.recommendation();
        let moderate = ConfidenceBand::Moderate.recommendation();
        let low = ConfidenceBand::Low.recommendation();

        assert!(strong.contains("Strong confidence"));
        assert!(moderate.contains("Moderate confidence"));
        assert!(low.contains("Low confidence"));
        assert!(low.starts_with("Recommendations:\n"));
    }

    proptest! {
        #[test]
        fn prop_bands_partition_the_range(c in 0.0f64..=100.0) {
            let band = ConfidenceBand::from_confidence(c);
            let expected = if c > 80.0 {
                ConfidenceBand::Strong
            } else if c > 60.0 {
                ConfidenceBand::Moderate
            } else {
                ConfidenceBand::Low
            };
            prop_assert_eq!(band, expected);
        }

        #[test]
        fn prop_bands_are_monotonic(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
            let rank = |band: ConfidenceBand| match band {
                ConfidenceBand::Low => 0,
                ConfidenceBand::Moderate => 1,
                ConfidenceBand::Strong => 2,
            };
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                rank(ConfidenceBand::from_confidence(lo)) <= rank(ConfidenceBand::from_confidence(hi))
            );
        }
    }
}
