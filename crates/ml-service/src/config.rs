//! Service configuration

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;
use waste_ml_lib::store::{ArtifactConfig, DEFAULT_MAX_ARTIFACT_BYTES};

/// ML service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the model artifacts
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    #[serde(default = "default_quantity_model_file")]
    pub quantity_model_file: String,

    #[serde(default = "default_classification_model_file")]
    pub classification_model_file: String,

    #[serde(default = "default_label_decoder_file")]
    pub label_decoder_file: String,

    #[serde(default = "default_eco_config_file")]
    pub eco_config_file: String,

    /// Artifacts larger than this are rejected
    #[serde(default = "default_max_artifact_bytes")]
    pub max_artifact_bytes: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5005
}

fn default_models_dir() -> PathBuf {
    ArtifactConfig::default().models_dir
}

fn default_quantity_model_file() -> String {
    ArtifactConfig::default().quantity_model_file
}

fn default_classification_model_file() -> String {
    ArtifactConfig::default().classification_model_file
}

fn default_label_decoder_file() -> String {
    ArtifactConfig::default().label_decoder_file
}

fn default_eco_config_file() -> String {
    ArtifactConfig::default().eco_config_file
}

fn default_max_artifact_bytes() -> u64 {
    DEFAULT_MAX_ARTIFACT_BYTES
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            models_dir: default_models_dir(),
            quantity_model_file: default_quantity_model_file(),
            classification_model_file: default_classification_model_file(),
            label_decoder_file: default_label_decoder_file(),
            eco_config_file: default_eco_config_file(),
            max_artifact_bytes: default_max_artifact_bytes(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from `ML_SERVICE_*` environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("ML_SERVICE").try_parsing(true))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Invalid service configuration, using defaults");
            ServiceConfig::default()
        }))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn artifact_config(&self) -> ArtifactConfig {
        ArtifactConfig {
            models_dir: self.models_dir.clone(),
            quantity_model_file: self.quantity_model_file.clone(),
            classification_model_file: self.classification_model_file.clone(),
            label_decoder_file: self.label_decoder_file.clone(),
            eco_config_file: self.eco_config_file.clone(),
            max_artifact_bytes: self.max_artifact_bytes,
        }
    }
}
