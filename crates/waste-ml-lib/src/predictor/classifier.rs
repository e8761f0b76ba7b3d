//! Waste type classification from a description

use super::{Classifier, KeywordFeatureExtractor, LabelDecoder};
use crate::error::ServiceError;
use crate::models::{
    now_timestamp, round_to, ClassifyRequest, ClassifyResponse, WasteCategory, WasteType,
};
use std::sync::Arc;

/// Classifies a waste description into one of the canonical waste types
#[derive(Clone)]
pub struct TypeClassifier {
    extractor: KeywordFeatureExtractor,
    model: Option<(Arc<dyn Classifier>, Arc<LabelDecoder>)>,
}

impl TypeClassifier {
    /// The classifier is only usable when both model and decoder are present
    pub fn new(model: Option<Arc<dyn Classifier>>, decoder: Option<Arc<LabelDecoder>>) -> Self {
        Self {
            extractor: KeywordFeatureExtractor::new(),
            model: model.zip(decoder),
        }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    pub fn classify(&self, request: &ClassifyRequest) -> Result<ClassifyResponse, ServiceError> {
        let description = request.description.as_deref().unwrap_or_default();
        // Unrecognized hints are ignored
        let category = request
            .category
            .as_deref()
            .and_then(|c| c.parse::<WasteCategory>().ok());

        let features = self.extractor.extract(description, category);

        let (model, decoder) = self
            .model
            .as_ref()
            .ok_or(ServiceError::ModelUnavailable(
                "Waste classification model not loaded",
            ))?;

        let wrap = |source: anyhow::Error| ServiceError::Inference {
            context: "Classification failed",
            source,
        };

        let prediction = model.predict(features.as_slice()).map_err(wrap)?;
        let label = decoder.decode(prediction.class_idx).map_err(wrap)?;

        // Labels outside the canonical set fall back to DRY without notice
        let waste_type = WasteType::from_label(label).unwrap_or(WasteType::Dry);
        let confidence = (prediction.confidence() as f64).clamp(0.0, 1.0);

        Ok(ClassifyResponse {
            waste_type,
            confidence: round_to(confidence, 2),
            timestamp: now_timestamp(),
        })
    }
}
