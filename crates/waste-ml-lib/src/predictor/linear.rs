//! Linear models stored as JSON coefficients
//!
//! Lets a regressor or classifier be shipped as plain coefficients (for
//! example `coef_`/`intercept_` exported from a fitted scikit-learn model)
//! instead of an ONNX graph.

use super::{ClassPrediction, Classifier, Regressor};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// `y = coefficients · x + intercept`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f32>,
    #[serde(default)]
    pub intercept: f32,
}

impl LinearRegressor {
    pub fn validate(&self, num_features: usize) -> Result<()> {
        if self.coefficients.len() != num_features {
            anyhow::bail!(
                "Regressor has {} coefficients, expected {}",
                self.coefficients.len(),
                num_features
            );
        }
        Ok(())
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &[f32]) -> Result<f32> {
        self.validate(features.len())?;
        Ok(dot(&self.coefficients, features) + self.intercept)
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

/// Logistic regression classifier
///
/// With one coefficient row the model is binary and the probabilities are
/// `[1 - p, p]`; with k rows the class probabilities are the softmax of
/// the k decision values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub coefficients: Vec<Vec<f32>>,
    pub intercepts: Vec<f32>,
}

impl LogisticClassifier {
    pub fn validate(&self, num_features: usize) -> Result<()> {
        if self.coefficients.is_empty() {
            anyhow::bail!("Classifier has no coefficient rows");
        }
        if self.coefficients.len() != self.intercepts.len() {
            anyhow::bail!(
                "Classifier has {} coefficient rows but {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            );
        }
        if let Some(row) = self.coefficients.iter().find(|r| r.len() != num_features) {
            anyhow::bail!(
                "Classifier row has {} coefficients, expected {}",
                row.len(),
                num_features
            );
        }
        Ok(())
    }

    pub fn num_classes(&self) -> usize {
        match self.coefficients.len() {
            1 => 2,
            n => n,
        }
    }
}

impl Classifier for LogisticClassifier {
    fn predict(&self, features: &[f32]) -> Result<ClassPrediction> {
        self.validate(features.len())?;

        let decisions: Vec<f32> = self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| dot(row, features) + b)
            .collect();

        let probabilities = if decisions.len() == 1 {
            let p = sigmoid(decisions[0]);
            vec![1.0 - p, p]
        } else {
            softmax(&decisions)
        };

        ClassPrediction::from_probabilities(probabilities)
    }

    fn kind(&self) -> &'static str {
        "logistic"
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn softmax(values: &[f32]) -> Vec<f32> {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = values.iter().map(|v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
