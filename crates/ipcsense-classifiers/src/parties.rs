//! Party extraction from case descriptions
//!
//! Heuristic, regex-based, and deliberately loose: it can both over- and
//! under-extract. Labels are de-duplicated case-insensitively, keeping the
//! first label produced for each party.

use ipcsense_core::text::title_case;
use ipcsense_core::{Error, Result};
use regex::Regex;

/// Party extractor using regex patterns
pub struct PartyExtractor {
    person_regex: Regex,
    name_regex: Regex,
    role_regexes: Vec<Regex>,
}

impl PartyExtractor {
    /// Create a new party extractor
    pub fn new() -> Result<Self> {
        let role_regexes = ["accused", "victim", "complainant"]
            .iter()
            .map(|role| {
                Regex::new(&format!(r"(?i)\b(the\s+{})\b", role)).map_err(|e| {
                    Error::classifier(format!("Failed to compile role regex: {}", e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            person_regex: Regex::new(r"(?i)(person\s+[a-z])\b").map_err(|e| {
                Error::classifier(format!("Failed to compile person regex: {}", e))
            })?,
            name_regex: Regex::new(r"\b([A-Z][a-z]+\s+[A-Z][a-z]+)\b")
                .map_err(|e| Error::classifier(format!("Failed to compile name regex: {}", e)))?,
            role_regexes,
        })
    }

    /// Extract the parties mentioned in `text`, in discovery order
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut parties = PartyList::default();

        for caps in self.person_regex.captures_iter(text) {
            parties.push(title_case(&caps[1]));
        }

        for caps in self.name_regex.captures_iter(text) {
            parties.push(caps[1].to_string());
        }

        for regex in &self.role_regexes {
            for caps in regex.captures_iter(text) {
                parties.push(title_case(&caps[1]));
            }
        }

        if parties.is_empty() {
            let lower = text.to_lowercase();
            if lower.contains("accused") {
                parties.push("The Accused".to_string());
            }
            if lower.contains("victim") {
                parties.push("The Victim".to_string());
            }
        }

        parties.into_inner()
    }
}

impl Default for PartyExtractor {
    fn default() -> Self {
        Self::new().expect("Failed to create party extractor")
    }
}

/// Ordered list with case-insensitive de-duplication
#[derive(Default)]
struct PartyList {
    labels: Vec<String>,
    seen: Vec<String>,
}

impl PartyList {
    fn push(&mut self, label: String) {
        let key = label.to_lowercase();
        if !self.seen.contains(&key) {
            self.seen.push(key);
            self.labels.push(label);
        }
    }

    fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn into_inner(self) -> Vec<String> {
        self.labels
    }
}
