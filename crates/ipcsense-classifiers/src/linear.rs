//! Linear classification model loaded from a serialized artifact

use ipcsense_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Multinomial linear model: one weight row and intercept per class.
///
/// A single weight row is accepted for two-class models, in which case the
/// row scores the second class against the first through a logistic link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    /// Weight matrix, `[n_rows][n_features]`
    pub coef: Vec<Vec<f64>>,

    /// Intercept per row
    pub intercept: Vec<f64>,
}

impl LinearModel {
    /// Number of feature columns the model expects
    pub fn n_features(&self) -> usize {
        self.coef.first().map(Vec::len).unwrap_or(0)
    }

    /// Check the model shape against the class count and feature width
    pub fn validate(&self, n_classes: usize, n_features: usize) -> Result<()> {
        let expected_rows = if n_classes == 2 && self.coef.len() == 1 {
            1
        } else {
            n_classes
        };

        if n_classes < 2 {
            return Err(Error::artifact(format!(
                "linear model needs at least 2 classes, got {}",
                n_classes
            )));
        }

        if self.coef.len() != expected_rows || self.intercept.len() != expected_rows {
            return Err(Error::artifact(format!(
                "linear model has {} weight rows and {} intercepts, expected {}",
                self.coef.len(),
                self.intercept.len(),
                expected_rows
            )));
        }

        if let Some(row) = self.coef.iter().position(|row| row.len() != n_features) {
            return Err(Error::artifact(format!(
                "weight row {} has {} columns, vectorizer produces {}",
                row,
                self.coef[row].len(),
                n_features
            )));
        }

        Ok(())
    }

    /// Class probabilities for a sparse feature row
    pub fn predict_proba(&self, row: &[(usize, f64)]) -> Vec<f64> {
        let scores: Vec<f64> = self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, bias)| {
                row.iter()
                    .filter_map(|(column, value)| weights.get(*column).map(|w| w * value))
                    .sum::<f64>()
                    + bias
            })
            .collect();

        if scores.len() == 1 {
            let positive = 1.0 / (1.0 + (-scores[0]).exp());
            return vec![1.0 - positive, positive];
        }

        softmax(&scores)
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
