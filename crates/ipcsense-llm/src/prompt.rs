//! Prompt construction and response parsing

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const DEFAULT_CONFIDENCE: u32 = 85;
const UNKNOWN_SECTION: &str = "Unknown";

/// Structured case details submitted for an LLM prediction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaseReport {
    pub case_description: String,
    pub crime_type: String,
    pub location: String,
    pub date: String,
    pub evidence: Vec<String>,
}

impl CaseReport {
    /// Whether description, crime type, location, and date are all present.
    /// Evidence may be empty.
    pub fn is_complete(&self) -> bool {
        [
            &self.case_description,
            &self.crime_type,
            &self.location,
            &self.date,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }

    /// Render the analysis prompt
    pub fn prompt(&self) -> String {
        format!(
            "Analyze the following legal case and provide IPC section predictions:
Case Type: {}
Location: {}
Date: {}
Evidence Available: {}
Case Description: {}

Please provide:
1. The most relevant IPC section
2. Confidence level (as a percentage)
3. Legal explanation
4. Recommendations for next steps",
            self.crime_type,
            self.location,
            self.date,
            self.evidence.join(", "),
            self.case_description
        )
    }
}

/// Fields recovered from a free-form model answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmPrediction {
    /// First `Section N` mentioned, or `"Unknown"`
    pub predicted_section: String,

    /// Stated confidence percentage, or 85 when none is stated
    pub confidence: u32,

    pub explanation: String,

    pub recommendations: Vec<String>,
}

fn section_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)section (\d+)").expect("section pattern is valid"))
}

fn confidence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)confidence:\s*(\d+)").expect("confidence pattern is valid")
    })
}

fn explanation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)explanation:(.*?)(?:recommendations:|$)")
            .expect("explanation pattern is valid")
    })
}

fn recommendations_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)recommendations:(.*)$").expect("recommendations pattern is valid")
    })
}

/// Best-effort extraction of a prediction from a model answer.
///
/// Every field has a fallback, so this never fails: the explanation falls
/// back to the whole answer and recommendations to two generic steps.
pub fn parse_llm_prediction(response: &str) -> LlmPrediction {
    let predicted_section = section_regex()
        .captures(response)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| UNKNOWN_SECTION.to_string());

    let confidence = confidence_regex()
        .captures(response)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(DEFAULT_CONFIDENCE);

    let explanation = explanation_regex()
        .captures(response)
        .map(|caps| caps[1].trim().to_string())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| response.trim().to_string());

    let recommendations: Vec<String> = recommendations_regex()
        .captures(response)
        .map(|caps| {
            caps[1]
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let recommendations = if recommendations.is_empty() {
        vec![
            "Consult with a legal professional".to_string(),
            "Gather additional evidence".to_string(),
        ]
    } else {
        recommendations
    };

    LlmPrediction {
        predicted_section,
        confidence,
        explanation,
        recommendations,
    }
}
