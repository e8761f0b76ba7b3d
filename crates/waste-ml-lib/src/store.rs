//! Read-only store of the model artifacts loaded at startup
//!
//! Each artifact loads independently. A missing or corrupt artifact is
//! logged and left out, and only the endpoints that need it report the
//! model as unavailable. Nothing is reloaded after startup.

use crate::eco_score::{EcoScoreCalculator, EcoScoreConfig};
use crate::error::LoadError;
use crate::health::{components, ComponentHealth, HealthResponse};
use crate::predictor::{
    Classifier, LabelDecoder, LinearRegressor, LogisticClassifier, OnnxClassifier, OnnxRegressor,
    QuantityPredictor, Regressor, TreeEnsembleRegressor, TypeClassifier, NUM_QUANTITY_FEATURES,
    NUM_WASTE_FEATURES,
};
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Name of the optional checksum manifest in the models directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Default maximum artifact size (50 MiB)
pub const DEFAULT_MAX_ARTIFACT_BYTES: u64 = 50 * 1024 * 1024;

/// Location and limits of the model artifacts
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    pub models_dir: PathBuf,
    pub quantity_model_file: String,
    pub classification_model_file: String,
    pub label_decoder_file: String,
    pub eco_config_file: String,
    pub max_artifact_bytes: u64,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            quantity_model_file: "waste_quantity_model.onnx".to_string(),
            classification_model_file: "waste_classification_model.onnx".to_string(),
            label_decoder_file: "waste_label_encoder.json".to_string(),
            eco_config_file: "eco_score_config.json".to_string(),
            max_artifact_bytes: DEFAULT_MAX_ARTIFACT_BYTES,
        }
    }
}

/// Outcome of loading one artifact
#[derive(Debug, Clone)]
pub struct ArtifactStatus {
    pub name: &'static str,
    pub path: PathBuf,
    pub error: Option<String>,
}

impl ArtifactStatus {
    pub fn loaded(&self) -> bool {
        self.error.is_none()
    }
}

/// Expected SHA-256 digests keyed by artifact file name
#[derive(Debug, Default)]
struct Manifest {
    checksums: HashMap<String, String>,
}

impl Manifest {
    fn load(models_dir: &Path) -> Result<Self, LoadError> {
        let path = models_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let checksums = serde_json::from_slice(&content).map_err(|e| LoadError::Invalid {
            path,
            source: e.into(),
        })?;
        Ok(Self { checksums })
    }

    fn verify(&self, path: &Path, data: &[u8]) -> Result<(), LoadError> {
        let Some(expected) = path
            .file_name()
            .and_then(|name| self.checksums.get(&*name.to_string_lossy()))
        else {
            return Ok(());
        };

        let actual = compute_checksum(data);
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(LoadError::ChecksumMismatch {
                path: path.to_path_buf(),
                expected: expected.clone(),
                actual,
            });
        }
        Ok(())
    }
}

/// Compute SHA256 checksum of data
pub fn compute_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Reads artifact bytes with size and checksum checks
struct ArtifactReader<'a> {
    manifest: Result<Manifest, LoadError>,
    config: &'a ArtifactConfig,
}

impl<'a> ArtifactReader<'a> {
    fn new(config: &'a ArtifactConfig) -> Self {
        Self {
            manifest: Manifest::load(&config.models_dir),
            config,
        }
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, LoadError> {
        let manifest = match &self.manifest {
            Ok(manifest) => manifest,
            Err(e) => {
                return Err(LoadError::Invalid {
                    path: self.config.models_dir.join(MANIFEST_FILE),
                    source: anyhow::anyhow!("{}", e),
                })
            }
        };

        if !path.exists() {
            return Err(LoadError::Missing(path.to_path_buf()));
        }
        let io_err = |source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let size = fs::metadata(path).map_err(io_err)?.len();
        if size > self.config.max_artifact_bytes {
            return Err(LoadError::TooLarge {
                path: path.to_path_buf(),
                size,
                max: self.config.max_artifact_bytes,
            });
        }

        let data = fs::read(path).map_err(io_err)?;
        manifest.verify(path, &data)?;
        Ok(data)
    }
}

fn parse_json<T: DeserializeOwned>(path: &Path, data: &[u8]) -> Result<T, LoadError> {
    serde_json::from_slice(data).map_err(|e| LoadError::Invalid {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn from_json_value<T: DeserializeOwned>(
    path: &Path,
    value: serde_json::Value,
) -> Result<T, LoadError> {
    serde_json::from_value(value).map_err(|e| LoadError::Invalid {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn invalid(path: &Path) -> impl FnOnce(anyhow::Error) -> LoadError + '_ {
    move |source| LoadError::Invalid {
        path: path.to_path_buf(),
        source,
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

/// Load a regressor, choosing the backend by file extension
///
/// A `.json` regressor with a `trees` key is a tree ensemble, anything
/// else is read as linear coefficients.
pub fn load_regressor(path: &Path, data: &[u8]) -> Result<Arc<dyn Regressor>, LoadError> {
    match extension(path).as_deref() {
        Some("onnx") => {
            let model = OnnxRegressor::new(data, NUM_QUANTITY_FEATURES).map_err(invalid(path))?;
            Ok(Arc::new(model))
        }
        Some("json") => {
            let value: serde_json::Value = parse_json(path, data)?;
            if value.get("trees").is_some() {
                let model: TreeEnsembleRegressor = from_json_value(path, value)?;
                model
                    .validate(NUM_QUANTITY_FEATURES)
                    .map_err(invalid(path))?;
                Ok(Arc::new(model))
            } else {
                let model: LinearRegressor = from_json_value(path, value)?;
                model
                    .validate(NUM_QUANTITY_FEATURES)
                    .map_err(invalid(path))?;
                Ok(Arc::new(model))
            }
        }
        _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Load a classifier, choosing the backend by file extension
pub fn load_classifier(path: &Path, data: &[u8]) -> Result<Arc<dyn Classifier>, LoadError> {
    match extension(path).as_deref() {
        Some("onnx") => {
            let model = OnnxClassifier::new(data, NUM_WASTE_FEATURES).map_err(invalid(path))?;
            Ok(Arc::new(model))
        }
        Some("json") => {
            let model: LogisticClassifier = parse_json(path, data)?;
            model.validate(NUM_WASTE_FEATURES).map_err(invalid(path))?;
            Ok(Arc::new(model))
        }
        _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn load_label_decoder(path: &Path, data: &[u8]) -> Result<LabelDecoder, LoadError> {
    let decoder: LabelDecoder = parse_json(path, data)?;
    if decoder.is_empty() {
        return Err(invalid(path)(anyhow::anyhow!("Label decoder has no classes")));
    }
    Ok(decoder)
}

fn load_eco_config(path: &Path, data: &[u8]) -> Result<EcoScoreConfig, LoadError> {
    let config: EcoScoreConfig = parse_json(path, data)?;
    config
        .validate()
        .map_err(|msg| invalid(path)(anyhow::anyhow!(msg)))?;
    Ok(config)
}

/// Process-wide model state, read-only after construction
pub struct ModelStore {
    quantity_model: Option<Arc<dyn Regressor>>,
    classification_model: Option<Arc<dyn Classifier>>,
    label_decoder: Option<Arc<LabelDecoder>>,
    eco_config: Option<EcoScoreConfig>,
    statuses: Vec<ArtifactStatus>,
}

impl ModelStore {
    /// Load every artifact from disk, keeping whatever loads successfully
    pub fn load(config: &ArtifactConfig) -> Self {
        let reader = ArtifactReader::new(config);
        let dir = &config.models_dir;
        let mut statuses = Vec::with_capacity(4);

        let quantity_path = dir.join(&config.quantity_model_file);
        let quantity_model = record(
            &mut statuses,
            components::QUANTITY_MODEL,
            &quantity_path,
            reader
                .read(&quantity_path)
                .and_then(|data| load_regressor(&quantity_path, &data))
                .map(|m| (m.kind(), m)),
        );

        let classifier_path = dir.join(&config.classification_model_file);
        let classification_model = record(
            &mut statuses,
            components::CLASSIFICATION_MODEL,
            &classifier_path,
            reader
                .read(&classifier_path)
                .and_then(|data| load_classifier(&classifier_path, &data))
                .map(|m| (m.kind(), m)),
        );

        let decoder_path = dir.join(&config.label_decoder_file);
        let label_decoder = record(
            &mut statuses,
            components::LABEL_DECODER,
            &decoder_path,
            reader
                .read(&decoder_path)
                .and_then(|data| load_label_decoder(&decoder_path, &data))
                .map(|d| ("json", Arc::new(d))),
        );

        let eco_path = dir.join(&config.eco_config_file);
        let eco_config = record(
            &mut statuses,
            components::ECO_CONFIG,
            &eco_path,
            reader
                .read(&eco_path)
                .and_then(|data| load_eco_config(&eco_path, &data))
                .map(|c| ("json", c)),
        );

        let store = Self {
            quantity_model,
            classification_model,
            label_decoder,
            eco_config,
            statuses,
        };

        if store.loaded_count() == store.statuses.len() {
            info!(models_dir = %dir.display(), "All models loaded successfully");
        } else {
            warn!(
                models_dir = %dir.display(),
                loaded = store.loaded_count(),
                total = store.statuses.len(),
                "Some model artifacts could not be loaded"
            );
        }

        store
    }

    pub fn builder() -> ModelStoreBuilder {
        ModelStoreBuilder::default()
    }

    pub fn quantity_predictor(&self) -> QuantityPredictor {
        QuantityPredictor::new(self.quantity_model.clone())
    }

    pub fn type_classifier(&self) -> TypeClassifier {
        TypeClassifier::new(
            self.classification_model.clone(),
            self.label_decoder.clone(),
        )
    }

    /// Calculator over the loaded table, or the defaults when none loaded
    pub fn eco_score_calculator(&self) -> EcoScoreCalculator {
        EcoScoreCalculator::new(self.eco_config.clone().unwrap_or_default())
    }

    pub fn statuses(&self) -> &[ArtifactStatus] {
        &self.statuses
    }

    pub fn loaded_count(&self) -> usize {
        self.statuses.iter().filter(|s| s.loaded()).count()
    }

    /// True when at least one artifact loaded
    pub fn models_loaded(&self) -> bool {
        self.loaded_count() > 0
    }

    /// Per-artifact health; unhealthy only when neither model can serve
    pub fn health(&self) -> HealthResponse {
        let components = self
            .statuses
            .iter()
            .map(|status| {
                let health = match (&status.error, status.name) {
                    (None, _) => ComponentHealth::healthy(),
                    (Some(e), components::ECO_CONFIG) => ComponentHealth::degraded(format!(
                        "{}; using default eco score configuration",
                        e
                    )),
                    (Some(e), _) => ComponentHealth::unhealthy(e.clone()),
                };
                (status.name.to_string(), health)
            })
            .collect();

        let serving = self.quantity_model.is_some()
            || (self.classification_model.is_some() && self.label_decoder.is_some());
        HealthResponse::new(components, serving)
    }
}

/// Log a load outcome, record its status and keep the value on success
fn record<T>(
    statuses: &mut Vec<ArtifactStatus>,
    name: &'static str,
    path: &Path,
    result: Result<(&'static str, T), LoadError>,
) -> Option<T> {
    match result {
        Ok((kind, value)) => {
            info!(
                event = "artifact_loaded",
                artifact = name,
                kind = kind,
                path = %path.display(),
                "Loaded model artifact"
            );
            statuses.push(ArtifactStatus {
                name,
                path: path.to_path_buf(),
                error: None,
            });
            Some(value)
        }
        Err(e) => {
            warn!(
                event = "artifact_load_failed",
                artifact = name,
                path = %path.display(),
                error = %e,
                "Failed to load model artifact"
            );
            statuses.push(ArtifactStatus {
                name,
                path: path.to_path_buf(),
                error: Some(e.to_string()),
            });
            None
        }
    }
}

/// Assembles a store from in-memory artifacts
#[derive(Default)]
pub struct ModelStoreBuilder {
    quantity_model: Option<Arc<dyn Regressor>>,
    classification_model: Option<Arc<dyn Classifier>>,
    label_decoder: Option<LabelDecoder>,
    eco_config: Option<EcoScoreConfig>,
}

impl ModelStoreBuilder {
    pub fn quantity_model(mut self, model: Arc<dyn Regressor>) -> Self {
        self.quantity_model = Some(model);
        self
    }

    pub fn classification_model(mut self, model: Arc<dyn Classifier>) -> Self {
        self.classification_model = Some(model);
        self
    }

    pub fn label_decoder(mut self, decoder: LabelDecoder) -> Self {
        self.label_decoder = Some(decoder);
        self
    }

    pub fn eco_config(mut self, config: EcoScoreConfig) -> Self {
        self.eco_config = Some(config);
        self
    }

    pub fn build(self) -> ModelStore {
        fn status(name: &'static str, present: bool) -> ArtifactStatus {
            ArtifactStatus {
                name,
                path: PathBuf::from("<memory>"),
                error: (!present).then(|| "not provided".to_string()),
            }
        }

        let statuses = vec![
            status(components::QUANTITY_MODEL, self.quantity_model.is_some()),
            status(
                components::CLASSIFICATION_MODEL,
                self.classification_model.is_some(),
            ),
            status(components::LABEL_DECODER, self.label_decoder.is_some()),
            status(components::ECO_CONFIG, self.eco_config.is_some()),
        ];

        ModelStore {
            quantity_model: self.quantity_model,
            classification_model: self.classification_model,
            label_decoder: self.label_decoder.map(Arc::new),
            eco_config: self.eco_config,
            statuses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::ComponentStatus;
    use crate::models::{ClassifyRequest, EcoScoreRequest, QuantityRequest, WasteType};
    use tempfile::TempDir;

    const QUANTITY_JSON: &str =
        r#"{"coefficients": [0.5, 2.0, 1.0, 0.7], "intercept": 10.0}"#;
    const CLASSIFIER_JSON: &str = r#"{
        "coefficients": [
            [2.0, -1.0, 2.0, 2.0, -1.0, -1.0],
            [-1.0, -1.0, -1.0, -1.0, 4.0, -1.0],
            [-1.0, -1.0, -1.0, -1.0, -1.0, 4.0],
            [-1.0, 4.0, -1.0, -1.0, -1.0, -1.0]
        ],
        "intercepts": [0.0, 0.0, 0.0, 0.0]
    }"#;
    const DECODER_JSON: &str = r#"{"classes": ["DRY", "E_WASTE", "HAZARDOUS", "WET"]}"#;
    const ECO_JSON: &str = r#"{"activity_weight": 2, "frequency_thresholds": [2, 5, 10]}"#;

    fn json_config(dir: &TempDir) -> ArtifactConfig {
        ArtifactConfig {
            models_dir: dir.path().to_path_buf(),
            quantity_model_file: "waste_quantity_model.json".to_string(),
            classification_model_file: "waste_classification_model.json".to_string(),
            ..ArtifactConfig::default()
        }
    }

    fn write_all(dir: &TempDir, config: &ArtifactConfig) {
        fs::write(dir.path().join(&config.quantity_model_file), QUANTITY_JSON).unwrap();
        fs::write(
            dir.path().join(&config.classification_model_file),
            CLASSIFIER_JSON,
        )
        .unwrap();
        fs::write(dir.path().join(&config.label_decoder_file), DECODER_JSON).unwrap();
        fs::write(dir.path().join(&config.eco_config_file), ECO_JSON).unwrap();
    }

    #[test]
    fn test_load_all_artifacts() {
        let dir = TempDir::new().unwrap();
        let config = json_config(&dir);
        write_all(&dir, &config);

        let store = ModelStore::load(&config);
        assert_eq!(store.loaded_count(), 4);
        assert!(store.models_loaded());
        assert_eq!(store.health().status, ComponentStatus::Healthy);

        let response = store
            .quantity_predictor()
            .predict(&QuantityRequest {
                zone_id: Some(2),
                historical_waste: Some(100.0),
                day_of_week: Some(1),
                month: Some(3),
            })
            .unwrap();
        // 1 + 2 + 3 + 70 + 10
        assert_eq!(response.predicted_waste_kg, 86.0);

        let response = store
            .type_classifier()
            .classify(&ClassifyRequest {
                description: Some("old laptop".to_string()),
                category: None,
            })
            .unwrap();
        assert_eq!(response.waste_type, WasteType::EWaste);
    }

    #[test]
    fn test_empty_directory_degrades_gracefully() {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::load(&json_config(&dir));

        assert_eq!(store.loaded_count(), 0);
        assert!(!store.models_loaded());
        assert!(!store.quantity_predictor().is_available());
        assert!(!store.type_classifier().is_available());
        assert_eq!(store.health().status, ComponentStatus::Unhealthy);
        assert!(store
            .statuses()
            .iter()
            .all(|s| s.error.as_deref().unwrap().contains("not found")));

        // eco score still works from defaults
        let response = store
            .eco_score_calculator()
            .score(&EcoScoreRequest {
                user_id: Some(1),
                user_activity: 15.0,
                segregation_accuracy: 85.0,
                request_frequency: 8.0,
                avg_weight: 5.5,
            })
            .unwrap();
        assert_eq!(response.eco_score, 77);
    }

    #[test]
    fn test_one_corrupt_artifact_does_not_block_others() {
        let dir = TempDir::new().unwrap();
        let config = json_config(&dir);
        write_all(&dir, &config);
        fs::write(dir.path().join(&config.quantity_model_file), "{not json").unwrap();

        let store = ModelStore::load(&config);
        assert_eq!(store.loaded_count(), 3);
        assert!(!store.quantity_predictor().is_available());
        assert!(store.type_classifier().is_available());

        let health = store.health();
        assert_eq!(health.status, ComponentStatus::Degraded);
        assert_eq!(
            health.components[components::QUANTITY_MODEL].status,
            ComponentStatus::Unhealthy
        );
    }

    #[test]
    fn test_classifier_needs_decoder() {
        let dir = TempDir::new().unwrap();
        let config = json_config(&dir);
        write_all(&dir, &config);
        fs::remove_file(dir.path().join(&config.label_decoder_file)).unwrap();

        let store = ModelStore::load(&config);
        assert!(!store.type_classifier().is_available());
        assert!(store.quantity_predictor().is_available());
    }

    #[test]
    fn test_wrong_feature_count_rejected() {
        let dir = TempDir::new().unwrap();
        let config = json_config(&dir);
        write_all(&dir, &config);
        fs::write(
            dir.path().join(&config.quantity_model_file),
            r#"{"coefficients": [1.0, 2.0], "intercept": 0.0}"#,
        )
        .unwrap();

        let store = ModelStore::load(&config);
        assert!(!store.quantity_predictor().is_available());
    }

    #[test]
    fn test_tree_ensemble_regressor_artifact() {
        let dir = TempDir::new().unwrap();
        let config = json_config(&dir);
        write_all(&dir, &config);
        // two stumps on historical waste (feature 3)
        fs::write(
            dir.path().join(&config.quantity_model_file),
            r#"{"trees": [
                {"children_left": [1, -1, -1], "children_right": [2, -1, -1],
                 "feature": [3, -2, -2], "threshold": [50.0, -2.0, -2.0],
                 "value": [0.0, 40.0, 120.0]},
                {"children_left": [1, -1, -1], "children_right": [2, -1, -1],
                 "feature": [3, -2, -2], "threshold": [75.0, -2.0, -2.0],
                 "value": [0.0, 60.0, 140.0]}
            ]}"#,
        )
        .unwrap();

        let store = ModelStore::load(&config);
        assert!(store.quantity_predictor().is_available());
        assert!(store.statuses()[0].loaded());

        let predict = |historical_waste| {
            store
                .quantity_predictor()
                .predict(&QuantityRequest {
                    zone_id: Some(2),
                    historical_waste: Some(historical_waste),
                    day_of_week: Some(1),
                    month: Some(3),
                })
                .unwrap()
                .predicted_waste_kg
        };
        assert_eq!(predict(30.0), 50.0);
        assert_eq!(predict(60.0), 90.0);
        assert_eq!(predict(100.0), 130.0);
    }

    #[test]
    fn test_tree_ensemble_with_bad_split_rejected() {
        let dir = TempDir::new().unwrap();
        let config = json_config(&dir);
        write_all(&dir, &config);
        fs::write(
            dir.path().join(&config.quantity_model_file),
            r#"{"trees": [
                {"children_left": [1, -1, -1], "children_right": [2, -1, -1],
                 "feature": [9, -2, -2], "threshold": [50.0, -2.0, -2.0],
                 "value": [0.0, 40.0, 120.0]}
            ]}"#,
        )
        .unwrap();

        let store = ModelStore::load(&config);
        assert!(!store.quantity_predictor().is_available());
        assert_eq!(store.loaded_count(), 3);
    }

    #[test]
    fn test_invalid_eco_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = json_config(&dir);
        write_all(&dir, &config);
        fs::write(
            dir.path().join(&config.eco_config_file),
            r#"{"weight_scores": [10, 7, 5, 2]}"#,
        )
        .unwrap();

        let store = ModelStore::load(&config);
        assert_eq!(
            store.eco_score_calculator().config(),
            &EcoScoreConfig::default()
        );
        let health = store.health();
        assert_eq!(health.status, ComponentStatus::Degraded);
        assert_eq!(
            health.components[components::ECO_CONFIG].status,
            ComponentStatus::Degraded
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let config = ArtifactConfig {
            quantity_model_file: "waste_quantity_model.pkl".to_string(),
            ..json_config(&dir)
        };
        write_all(&dir, &config);

        let store = ModelStore::load(&config);
        let status = &store.statuses()[0];
        assert!(status
            .error
            .as_deref()
            .unwrap()
            .contains("unsupported artifact format"));
    }

    #[test]
    fn test_manifest_checksum_verified() {
        let dir = TempDir::new().unwrap();
        let config = json_config(&dir);
        write_all(&dir, &config);

        let manifest = HashMap::from([
            (
                config.quantity_model_file.clone(),
                compute_checksum(QUANTITY_JSON.as_bytes()),
            ),
            (config.label_decoder_file.clone(), "0".repeat(64)),
        ]);
        fs::write(
            dir.path().join(MANIFEST_FILE),
            serde_json::to_string(&manifest).unwrap(),
        )
        .unwrap();

        let store = ModelStore::load(&config);
        assert!(store.quantity_predictor().is_available());
        assert!(!store.type_classifier().is_available());

        let decoder_status = store
            .statuses()
            .iter()
            .find(|s| s.name == components::LABEL_DECODER)
            .unwrap();
        assert!(decoder_status
            .error
            .as_deref()
            .unwrap()
            .contains("checksum mismatch"));
    }

    #[test]
    fn test_corrupt_manifest_rejects_everything() {
        let dir = TempDir::new().unwrap();
        let config = json_config(&dir);
        write_all(&dir, &config);
        fs::write(dir.path().join(MANIFEST_FILE), "[[[").unwrap();

        let store = ModelStore::load(&config);
        assert_eq!(store.loaded_count(), 0);
    }

    #[test]
    fn test_oversized_artifact_rejected() {
        let dir = TempDir::new().unwrap();
        let config = ArtifactConfig {
            max_artifact_bytes: 16,
            ..json_config(&dir)
        };
        write_all(&dir, &config);

        let store = ModelStore::load(&config);
        assert!(!store.quantity_predictor().is_available());
        assert!(store.statuses()[0]
            .error
            .as_deref()
            .unwrap()
            .contains("maximum is 16"));
    }

    #[test]
    fn test_builder_store() {
        let store = ModelStore::builder()
            .quantity_model(Arc::new(LinearRegressor {
                coefficients: vec![0.0, 0.0, 0.0, 1.0],
                intercept: 0.0,
            }))
            .build();

        assert_eq!(store.loaded_count(), 1);
        assert!(store.quantity_predictor().is_available());
        assert!(!store.type_classifier().is_available());
        assert_eq!(store.health().status, ComponentStatus::Degraded);
    }

    #[test]
    fn test_compute_checksum() {
        let checksum = compute_checksum(b"eco");
        assert_eq!(checksum.len(), 64);
        assert_eq!(checksum, compute_checksum(b"eco"));
        assert_ne!(checksum, compute_checksum(b"eco2"));
    }
}
