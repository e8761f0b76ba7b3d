//! ONNX inference using tract
//!
//! Both models take a single `f32[1, n]` input row. The regressor reads the
//! first value of its first output. The classifier accepts either the
//! `[label, probabilities]` output pair produced by scikit-learn exports
//! or a single probability output.

use super::{ClassPrediction, Classifier, Regressor};
use anyhow::{Context, Result};
use std::time::Instant;
use tract_onnx::prelude::*;
use tracing::{debug, warn};

/// Maximum inference latency before warning
const MAX_INFERENCE_MS: u128 = 5;

type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Load and optimize an ONNX model from bytes
fn load_model(model_bytes: &[u8], num_features: usize) -> Result<TractModel> {
    let model = tract_onnx::onnx()
        .model_for_read(&mut std::io::Cursor::new(model_bytes))
        .context("Failed to parse ONNX model")?
        .with_input_fact(0, f32::fact([1, num_features]).into())
        .context("Failed to set input shape")?
        .into_optimized()
        .context("Failed to optimize model")?
        .into_runnable()
        .context("Failed to create runnable model")?;
    Ok(model)
}

/// Run one feature row through a model
fn run(model: &TractModel, num_features: usize, features: &[f32]) -> Result<TVec<TValue>> {
    if features.len() != num_features {
        anyhow::bail!(
            "Expected {} features, got {}",
            num_features,
            features.len()
        );
    }

    let start = Instant::now();
    let input: Tensor =
        tract_ndarray::Array2::from_shape_vec((1, num_features), features.to_vec())?.into();
    let outputs = model.run(tvec!(input.into()))?;

    let elapsed = start.elapsed();
    if elapsed.as_millis() > MAX_INFERENCE_MS {
        warn!(
            elapsed_ms = elapsed.as_millis(),
            "Inference exceeded {}ms target", MAX_INFERENCE_MS
        );
    } else {
        debug!(elapsed_us = elapsed.as_micros(), "Inference completed");
    }

    Ok(outputs)
}

/// ONNX-backed regressor
pub struct OnnxRegressor {
    model: TractModel,
    num_features: usize,
}

impl OnnxRegressor {
    pub fn new(model_bytes: &[u8], num_features: usize) -> Result<Self> {
        Ok(Self {
            model: load_model(model_bytes, num_features)?,
            num_features,
        })
    }
}

impl Regressor for OnnxRegressor {
    fn predict(&self, features: &[f32]) -> Result<f32> {
        let outputs = run(&self.model, self.num_features, features)?;
        let output = outputs.first().context("No output from model")?;
        let view = output.to_array_view::<f32>()?;
        view.iter().next().copied().context("Model output is empty")
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}

/// ONNX-backed classifier
pub struct OnnxClassifier {
    model: TractModel,
    num_features: usize,
}

impl OnnxClassifier {
    pub fn new(model_bytes: &[u8], num_features: usize) -> Result<Self> {
        Ok(Self {
            model: load_model(model_bytes, num_features)?,
            num_features,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &[f32]) -> Result<ClassPrediction> {
        let outputs = run(&self.model, self.num_features, features)?;

        match outputs.len() {
            0 => anyhow::bail!("No output from model"),
            1 => {
                let probabilities = outputs[0]
                    .to_array_view::<f32>()?
                    .iter()
                    .copied()
                    .collect();
                ClassPrediction::from_probabilities(probabilities)
            }
            _ => {
                let labels = outputs[0]
                    .cast_to::<i64>()
                    .context("Label output is not an integer tensor")?;
                let label = *labels
                    .as_slice::<i64>()?
                    .first()
                    .context("Label output is empty")?;
                let probabilities: Vec<f32> = outputs[1]
                    .to_array_view::<f32>()?
                    .iter()
                    .copied()
                    .collect();

                let class_idx = usize::try_from(label)
                    .with_context(|| format!("Negative class label {}", label))?;
                labelled_prediction(class_idx, probabilities)
            }
        }
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}

/// Pair a model's label output with its probability output
fn labelled_prediction(class_idx: usize, probabilities: Vec<f32>) -> Result<ClassPrediction> {
    if probabilities.is_empty() {
        anyhow::bail!("Probability output is empty");
    }
    if class_idx >= probabilities.len() {
        anyhow::bail!(
            "Class label {} has no probability ({} classes)",
            class_idx,
            probabilities.len()
        );
    }
    Ok(ClassPrediction {
        class_idx,
        probabilities,
    })
}
