//! Observability infrastructure for the ML service
//!
//! Provides:
//! - Prometheus metrics (request latency and outcomes, loaded artifacts, waste types)
//! - Structured JSON logging with tracing

use crate::error::ServiceError;
use crate::models::{ClassifyResponse, EcoScoreResponse, QuantityResponse, WasteType};
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, HistogramVec,
    IntCounterVec, IntGauge,
};
use std::sync::OnceLock;
use tracing::{error, info, warn};

/// Histogram buckets for request latency (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ServiceMetricsInner> = OnceLock::new();

struct ServiceMetricsInner {
    request_latency_seconds: HistogramVec,
    requests_total: IntCounterVec,
    models_loaded: IntGauge,
    waste_type_total: IntCounterVec,
}

impl ServiceMetricsInner {
    fn new() -> Self {
        Self {
            request_latency_seconds: register_histogram_vec!(
                "ml_service_request_latency_seconds",
                "Time spent handling a prediction request",
                &["endpoint"],
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register request_latency_seconds"),

            requests_total: register_int_counter_vec!(
                "ml_service_requests_total",
                "Prediction requests by endpoint and outcome",
                &["endpoint", "outcome"]
            )
            .expect("Failed to register requests_total"),

            models_loaded: register_int_gauge!(
                "ml_service_models_loaded",
                "Number of model artifacts loaded at startup"
            )
            .expect("Failed to register models_loaded"),

            waste_type_total: register_int_counter_vec!(
                "ml_service_waste_type_total",
                "Classification results by waste type",
                &["waste_type"]
            )
            .expect("Failed to register waste_type_total"),
        }
    }
}

/// Result class of a handled request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    ValidationError,
    ServerError,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Ok => "ok",
            Outcome::ValidationError => "validation_error",
            Outcome::ServerError => "server_error",
        }
    }

    pub fn of<T>(result: &Result<T, ServiceError>) -> Self {
        match result {
            Ok(_) => Outcome::Ok,
            Err(e) if e.is_validation() => Outcome::ValidationError,
            Err(_) => Outcome::ServerError,
        }
    }
}

/// Service metrics for Prometheus exposition
///
/// A lightweight handle to the global metrics instance; clones share it.
#[derive(Clone)]
pub struct ServiceMetrics {
    _private: (),
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ServiceMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ServiceMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record one handled request
    pub fn observe_request(&self, endpoint: &str, outcome: Outcome, duration_secs: f64) {
        let inner = self.inner();
        inner
            .request_latency_seconds
            .with_label_values(&[endpoint])
            .observe(duration_secs);
        inner
            .requests_total
            .with_label_values(&[endpoint, outcome.as_str()])
            .inc();
    }

    pub fn set_models_loaded(&self, count: usize) {
        self.inner().models_loaded.set(count as i64);
    }

    pub fn inc_waste_type(&self, waste_type: WasteType) {
        self.inner()
            .waste_type_total
            .with_label_values(&[waste_type.as_str()])
            .inc();
    }
}

/// Structured logger for service events
#[derive(Clone)]
pub struct StructuredLogger {
    service_name: String,
}

impl StructuredLogger {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }

    pub fn log_startup(&self, version: &str, address: &str, models_loaded: usize) {
        info!(
            event = "service_started",
            service = %self.service_name,
            version = %version,
            address = %address,
            models_loaded = models_loaded,
            "ML service started"
        );
    }

    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "service_shutdown",
            service = %self.service_name,
            reason = %reason,
            "ML service shutting down"
        );
    }

    pub fn log_quantity_prediction(&self, response: &QuantityResponse) {
        info!(
            event = "quantity_predicted",
            service = %self.service_name,
            zone_id = response.zone_id,
            predicted_waste_kg = response.predicted_waste_kg,
            "Predicted waste quantity"
        );
    }

    pub fn log_classification(&self, response: &ClassifyResponse) {
        info!(
            event = "waste_classified",
            service = %self.service_name,
            waste_type = %response.waste_type,
            confidence = response.confidence,
            "Classified waste"
        );
    }

    pub fn log_eco_score(&self, response: &EcoScoreResponse) {
        info!(
            event = "eco_score_calculated",
            service = %self.service_name,
            user_id = response.user_id,
            eco_score = response.eco_score,
            "Calculated eco score"
        );
    }

    /// Log a request that ended in an error response
    pub fn log_rejected(&self, endpoint: &str, err: &ServiceError) {
        if err.is_validation() {
            warn!(
                event = "request_rejected",
                service = %self.service_name,
                endpoint = %endpoint,
                error = %err,
                "Rejected invalid request"
            );
        } else {
            error!(
                event = "request_rejected",
                service = %self.service_name,
                endpoint = %endpoint,
                error = %err,
                "Request failed"
            );
        }
    }
}
