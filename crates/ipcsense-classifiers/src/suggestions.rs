//! Ranked section suggestions from keyword votes
//!
//! The top three voted sections are reported with a position-based
//! confidence. Sections with a catalogue entry reuse its wording; the rest
//! get a generic entry. A description with no known keyword gets the whole
//! catalogue.

use serde::{Deserialize, Serialize};

use crate::keyword::KeywordClassifier;

/// Number of voted sections reported
pub const MAX_SUGGESTIONS: usize = 3;

/// One suggested section, as returned by the suggestion endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSuggestion {
    /// Display label, e.g. "IPC 420"
    pub section: String,
    pub description: String,
    /// Percentage in 0..=100
    pub confidence: u32,
    pub punishment: String,
    pub relevance: String,
}

struct CatalogueEntry {
    code: &'static str,
    description: &'static str,
    confidence: u32,
    punishment: &'static str,
    relevance: &'static str,
}

const CATALOGUE: &[CatalogueEntry] = &[
    CatalogueEntry {
        code: "420",
        description: "Cheating and dishonestly inducing delivery of property",
        confidence: 98,
        punishment: "Imprisonment of either description for a term which may extend to seven years, and shall also be liable to fine.",
        relevance: "The case involves deception to obtain property, which is a key element of IPC 420.",
    },
    CatalogueEntry {
        code: "406",
        description: "Punishment for criminal breach of trust",
        confidence: 85,
        punishment: "Imprisonment of either description for a term which may extend to three years, or with fine, or with both.",
        relevance: "The property was entrusted to the accused who then misappropriated it, constituting a breach of trust.",
    },
    CatalogueEntry {
        code: "34",
        description: "Acts done by several persons in furtherance of common intention",
        confidence: 72,
        punishment: "Each person is liable for the act in the same manner as if it were done by him alone.",
        relevance: "Multiple individuals were involved in the execution of the offense with a shared intention.",
    },
    CatalogueEntry {
        code: "120B",
        description: "Punishment of criminal conspiracy",
        confidence: 65,
        punishment: "Same as that provided for the abetment of the offence which is the object of the conspiracy.",
        relevance: "There was a planned agreement between multiple parties to commit the offense.",
    },
    CatalogueEntry {
        code: "415",
        description: "Cheating",
        confidence: 60,
        punishment: "Varies based on the specific circumstances of the cheating.",
        relevance: "The accused deceived the victim by fraudulent or dishonest means.",
    },
];

impl CatalogueEntry {
    fn suggestion(&self, confidence: u32) -> SectionSuggestion {
        SectionSuggestion {
            section: label(self.code),
            description: self.description.to_string(),
            confidence,
            punishment: self.punishment.to_string(),
            relevance: self.relevance.to_string(),
        }
    }
}

fn label(code: &str) -> String {
    format!("IPC {}", code)
}

/// Confidence for the suggestion at `position` (0-based): 98, 83, 68, then 60
pub fn position_confidence(position: usize) -> u32 {
    let stepped = 98i64 - 15 * position as i64;
    stepped.max(60) as u32
}

/// The catalogue returned when no keyword matches
pub fn default_suggestions() -> Vec<SectionSuggestion> {
    CATALOGUE
        .iter()
        .map(|entry| entry.suggestion(entry.confidence))
        .collect()
}

/// Suggest sections for a description
pub fn suggest_sections(classifier: &KeywordClassifier, description: &str) -> Vec<SectionSuggestion> {
    let ranked = classifier.ranked_sections(description);
    if ranked.is_empty() {
        return default_suggestions();
    }

    ranked
        .iter()
        .take(MAX_SUGGESTIONS)
        .enumerate()
        .map(|(position, (section, _))| {
            let confidence = position_confidence(position);
            match CATALOGUE.iter().find(|entry| *section == entry.code) {
                Some(entry) => entry.suggestion(confidence),
                None => {
                    let section = label(section.as_str());
                    SectionSuggestion {
                        description: format!("{} of the Indian Penal Code", section),
                        section,
                        confidence,
                        punishment: "Punishment as prescribed by law for this offense.".to_string(),
                        relevance: "This section appears relevant based on the description provided."
                            .to_string(),
                    }
                }
            }
        })
        .collect()
}
