//! Prediction library for the smart waste management ML service
//!
//! This crate provides the core functionality for:
//! - Loading model artifacts into a read-only store
//! - Keyword feature extraction for waste descriptions
//! - Waste quantity prediction and waste type classification
//! - Rule-based user eco score calculation
//! - Health reporting and observability

pub mod eco_score;
pub mod error;
pub mod health;
pub mod models;
pub mod observability;
pub mod predictor;
pub mod store;

pub use eco_score::{EcoScoreCalculator, EcoScoreConfig};
pub use error::{LoadError, ServiceError};
pub use health::{ComponentHealth, ComponentStatus, HealthResponse};
pub use models::*;
pub use observability::{Outcome, ServiceMetrics, StructuredLogger};
pub use predictor::{
    ClassPrediction, Classifier, KeywordFeatureExtractor, QuantityPredictor, Regressor,
    TypeClassifier,
};
pub use store::{ArtifactConfig, ArtifactStatus, ModelStore, ModelStoreBuilder};
