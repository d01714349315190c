//! Keyword-table section classifier
//!
//! Artifact-free backend: every keyword found in the text votes once for each
//! of its candidate sections, and the vote counts are normalized into a
//! distribution. Text with no known keyword gets a uniform distribution.

use crate::classifier::SectionClassifier;
use aho_corasick::AhoCorasick;
use async_trait::async_trait;
use ipcsense_core::{Error, Result, SectionCode, SectionPrediction};
use std::collections::HashMap;
use std::time::Instant;

/// Default keyword table: keyword and its candidate sections
const DEFAULT_KEYWORDS: &[(&str, &[&str])] = &[
    ("theft", &["378", "379", "380"]),
    ("robbery", &["390", "392", "394"]),
    ("murder", &["302", "304", "300"]),
    ("assault", &["351", "352", "354"]),
    ("fraud", &["420", "415", "406"]),
    ("cheating", &["420", "415", "417"]),
    ("property", &["425", "426", "427"]),
    ("criminal", &["120B", "34", "149"]),
    ("conspiracy", &["120A", "120B", "107"]),
    ("breach", &["405", "406", "409"]),
    ("trust", &["405", "406", "409"]),
    ("forgery", &["463", "464", "465"]),
    ("document", &["463", "464", "466"]),
    ("trespass", &["441", "447", "448"]),
    ("hurt", &["319", "323", "324"]),
    ("kidnapping", &["359", "360", "363"]),
    ("abduction", &["362", "363", "366"]),
    ("rape", &["375", "376", "376A"]),
    ("defamation", &["499", "500", "501"]),
    ("extortion", &["383", "384", "385"]),
    ("bribery", &["171B", "171C", "171E"]),
    ("corruption", &["171B", "171C", "171E"]),
    ("riot", &["146", "147", "148"]),
    ("unlawful", &["141", "142", "143"]),
    ("assembly", &["141", "142", "143"]),
    ("sedition", &["124A", "153A", "153B"]),
    ("counterfeit", &["489A", "489B", "489C"]),
    ("currency", &["489A", "489B", "489C"]),
    ("suicide", &["305", "306", "309"]),
    ("dowry", &["304B", "498A"]),
    ("cruelty", &["498A", "323", "324"]),
    ("negligence", &["304A", "279", "337"]),
    ("accident", &["304A", "279", "337"]),
    ("mischief", &["425", "426", "427"]),
    ("damage", &["425", "426", "427"]),
    ("obscene", &["292", "293", "294"]),
    ("insult", &["504", "509"]),
    ("modesty", &["354", "509"]),
    ("woman", &["354", "509", "376"]),
    ("false", &["191", "192", "193"]),
    ("evidence", &["191", "192", "193"]),
    ("perjury", &["191", "192", "193"]),
    ("intimidation", &["503", "506", "507"]),
    ("threat", &["503", "506", "507"]),
    ("impersonation", &["416", "419"]),
    ("identity", &["416", "419"]),
    ("gambling", &["294A"]),
    ("lottery", &["294A"]),
    ("public", &["268", "269", "270"]),
    ("nuisance", &["268", "290", "291"]),
    ("obstruction", &["283", "341"]),
    ("escape", &["224", "225", "225B"]),
    ("custody", &["224", "225", "225B"]),
    ("abetment", &["107", "108", "109"]),
    ("attempt", &["511", "307", "308"]),
    ("intention", &["34", "149", "120A"]),
    ("common", &["34", "149", "120A"]),
];

/// Keyword-vote classifier using the Aho-Corasick algorithm
pub struct KeywordClassifier {
    name: String,
    matcher: AhoCorasick,
    /// Section indices per keyword, parallel to the matcher's patterns
    keyword_sections: Vec<Vec<usize>>,
    /// All sections in first-seen order
    sections: Vec<SectionCode>,
}

impl KeywordClassifier {
    /// Create a classifier from (keyword, candidate sections) pairs
    pub fn new(name: impl Into<String>, table: Vec<(String, Vec<SectionCode>)>) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::classifier("keyword table is empty"));
        }

        let mut sections: Vec<SectionCode> = Vec::new();
        let mut section_index: HashMap<SectionCode, usize> = HashMap::new();
        let mut keywords = Vec::with_capacity(table.len());
        let mut keyword_sections = Vec::with_capacity(table.len());

        for (keyword, candidates) in table {
            if keyword.trim().is_empty() {
                return Err(Error::classifier("keyword table contains an empty keyword"));
            }

            let mut indices = Vec::with_capacity(candidates.len());
            for section in candidates {
                let idx = *section_index.entry(section.clone()).or_insert_with(|| {
                    sections.push(section.clone());
                    sections.len() - 1
                });
                if !indices.contains(&idx) {
                    indices.push(idx);
                }
            }

            keywords.push(keyword);
            keyword_sections.push(indices);
        }

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&keywords)
            .map_err(|e| Error::classifier(format!("Failed to build keyword matcher: {}", e)))?;

        Ok(Self {
            name: name.into(),
            matcher,
            keyword_sections,
            sections,
        })
    }

    /// Create a classifier with the built-in keyword table
    pub fn with_default_table() -> Result<Self> {
        let table = DEFAULT_KEYWORDS
            .iter()
            .map(|(keyword, sections)| {
                (
                    keyword.to_string(),
                    sections.iter().map(|s| SectionCode::from(*s)).collect(),
                )
            })
            .collect();

        Self::new("keyword", table)
    }

    /// Sections this classifier can predict, in class order
    pub fn sections(&self) -> &[SectionCode] {
        &self.sections
    }

    /// Sections with at least one vote, most votes first.
    ///
    /// Ties keep the order in which sections were first voted for, walking
    /// the keyword table top to bottom.
    pub fn ranked_sections(&self, text: &str) -> Vec<(SectionCode, usize)> {
        let mut order: Vec<usize> = Vec::new();
        let mut counts = vec![0usize; self.sections.len()];

        for (keyword, hit) in self.matched_keywords(text).iter().enumerate() {
            if !*hit {
                continue;
            }
            for &section in &self.keyword_sections[keyword] {
                if counts[section] == 0 {
                    order.push(section);
                }
                counts[section] += 1;
            }
        }

        // stable, so ties keep first-voted order
        order.sort_by(|a, b| counts[*b].cmp(&counts[*a]));
        order
            .into_iter()
            .map(|idx| (self.sections[idx].clone(), counts[idx]))
            .collect()
    }

    fn matched_keywords(&self, text: &str) -> Vec<bool> {
        let mut matched = vec![false; self.keyword_sections.len()];
        for m in self.matcher.find_overlapping_iter(text) {
            matched[m.pattern().as_usize()] = true;
        }
        matched
    }

    fn votes(&self, text: &str) -> Vec<f64> {
        let mut votes = vec![0.0; self.sections.len()];
        for (keyword, hit) in self.matched_keywords(text).iter().enumerate() {
            if *hit {
                for &section in &self.keyword_sections[keyword] {
                    votes[section] += 1.0;
                }
            }
        }

        votes
    }
}

#[async_trait]
impl SectionClassifier for KeywordClassifier {
    async fn classify(&self, text: &str) -> Result<SectionPrediction> {
        let start = Instant::now();

        let votes = self.votes(text);
        let total: f64 = votes.iter().sum();
        let uniform = 1.0 / self.sections.len() as f64;

        let distribution = self
            .sections
            .iter()
            .cloned()
            .zip(votes)
            .map(|(section, vote)| {
                let prob = if total > 0.0 { vote / total } else { uniform };
                (section, prob)
            })
            .collect();

        let prediction = SectionPrediction::from_distribution(distribution)
            .ok_or_else(|| Error::classifier("keyword table produced no sections"))?;

        Ok(prediction.with_latency(start.elapsed().as_micros() as u64))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
