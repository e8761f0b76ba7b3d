//! ML prediction engine

mod classifier;
mod features;
mod inference;
mod labels;
mod linear;
mod quantity;
mod tree;

pub use classifier::TypeClassifier;
pub use features::{
    KeywordFeatureExtractor, WasteFeatures, CATEGORY_HINT_CONFIDENCE, FALLBACK_DRY_CONFIDENCE,
    NUM_WASTE_FEATURES,
};
pub use inference::{OnnxClassifier, OnnxRegressor};
pub use labels::LabelDecoder;
pub use linear::{LinearRegressor, LogisticClassifier};
pub use quantity::{QuantityFeatures, QuantityPredictor, NUM_QUANTITY_FEATURES};
pub use tree::{DecisionTree, TreeEnsembleRegressor};

use anyhow::Result;

/// Model that maps a feature row to a single real value
pub trait Regressor: Send + Sync {
    /// Predict the target for one feature row
    fn predict(&self, features: &[f32]) -> Result<f32>;

    /// Short description of the backing implementation, for logs
    fn kind(&self) -> &'static str;
}

/// Model that maps a feature row to an encoded class
pub trait Classifier: Send + Sync {
    /// Predict the class and per-class probabilities for one feature row
    fn predict(&self, features: &[f32]) -> Result<ClassPrediction>;

    /// Short description of the backing implementation, for logs
    fn kind(&self) -> &'static str;
}

/// Classification result from a model
#[derive(Debug, Clone, PartialEq)]
pub struct ClassPrediction {
    /// Encoded class index, decoded through a [`LabelDecoder`]
    pub class_idx: usize,
    /// Probability per encoded class
    pub probabilities: Vec<f32>,
}

impl ClassPrediction {
    /// Build a prediction whose class is the most probable one
    pub fn from_probabilities(probabilities: Vec<f32>) -> Result<Self> {
        let class_idx = argmax(&probabilities)
            .ok_or_else(|| anyhow::anyhow!("Model returned no class probabilities"))?;
        Ok(Self {
            class_idx,
            probabilities,
        })
    }

    /// Highest class probability
    pub fn confidence(&self) -> f32 {
        self.probabilities
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
            .max(0.0)
    }
}

fn argmax(values: &[f32]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}
