//! TF-IDF text vectorizer loaded from a serialized artifact

use ipcsense_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// TF-IDF vectorizer with a fixed vocabulary.
///
/// Mirrors the common "word n-gram, smoothed idf, L2 norm" layout: tokens
/// are runs of two or more word characters, n-grams are joined with a single
/// space, and the output row is L2-normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term (or space-joined n-gram) to feature column
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per feature column
    pub idf: Vec<f64>,

    /// Inclusive n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Use `1 + ln(tf)` instead of raw counts
    #[serde(default)]
    pub sublinear_tf: bool,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

impl TfidfVectorizer {
    /// Number of feature columns
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Check internal consistency of a deserialized vectorizer
    pub fn validate(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::artifact(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        if let Some((term, column)) = self
            .vocabulary
            .iter()
            .find(|(_, column)| **column >= self.idf.len())
        {
            return Err(Error::artifact(format!(
                "vocabulary term '{}' maps to column {} but idf has {} entries",
                term,
                column,
                self.idf.len()
            )));
        }

        Ok(())
    }

    /// Transform text into a sparse, L2-normalized TF-IDF row.
    ///
    /// Returns `(column, weight)` pairs sorted by column. Text with no known
    /// terms yields an empty row.
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        let tokens = tokenize(text);
        let (min_n, max_n) = self.ngram_range;

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                let gram = window.join(" ");
                if let Some(&column) = self.vocabulary.get(&gram) {
                    *counts.entry(column).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut row: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (column, tf * self.idf[column])
            })
            .collect();
        row.sort_by_key(|(column, _)| *column);

        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut row {
                *weight /= norm;
            }
        }

        row
    }
}

/// Split text into lowercase tokens of two or more word characters
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}
