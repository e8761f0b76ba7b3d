//! HTTP API for the prediction endpoints, health checks and Prometheus metrics

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use waste_ml_lib::{
    ClassifyRequest, ClassifyResponse, ComponentStatus, EcoScoreCalculator, EcoScoreRequest,
    EcoScoreResponse, ErrorResponse, ModelStore, Outcome, PingResponse, QuantityPredictor,
    QuantityRequest, QuantityResponse, ServiceError, ServiceMetrics, StructuredLogger,
    TypeClassifier,
};

pub const SERVICE_NAME: &str = "ml-service";

/// Shared application state
pub struct AppState {
    pub store: Arc<ModelStore>,
    pub quantity: QuantityPredictor,
    pub classifier: TypeClassifier,
    pub eco: EcoScoreCalculator,
    pub metrics: ServiceMetrics,
    pub logger: StructuredLogger,
}

impl AppState {
    pub fn new(store: Arc<ModelStore>) -> Self {
        let metrics = ServiceMetrics::new();
        metrics.set_models_loaded(store.loaded_count());

        Self {
            quantity: store.quantity_predictor(),
            classifier: store.type_classifier(),
            eco: store.eco_score_calculator(),
            metrics,
            logger: StructuredLogger::new(SERVICE_NAME),
            store,
        }
    }

    /// Record metrics for a finished request and map failures to a response
    fn finish<T>(
        &self,
        endpoint: &'static str,
        started: Instant,
        result: Result<T, ServiceError>,
    ) -> Result<Json<T>, ApiError> {
        self.metrics.observe_request(
            endpoint,
            Outcome::of(&result),
            started.elapsed().as_secs_f64(),
        );
        result.map(Json).map_err(|e| {
            self.logger.log_rejected(endpoint, &e);
            ApiError(e)
        })
    }
}

/// A `ServiceError` rendered as `{"error": ...}`
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Empty-ish JSON values count as a missing body
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Decode a request body into `T`
pub fn parse_body<T: DeserializeOwned>(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<T, ServiceError> {
    let value = match body {
        Ok(Json(value)) if !is_falsy(&value) => value,
        _ => return Err(ServiceError::validation("Request body is required")),
    };
    if !value.is_object() {
        return Err(ServiceError::validation(
            "Invalid request body: expected a JSON object",
        ));
    }
    serde_json::from_value(value)
        .map_err(|e| ServiceError::validation(format!("Invalid request body: {}", e)))
}

/// Run CPU-bound prediction work off the async runtime
async fn run_blocking<T, F>(context: &'static str, work: F) -> Result<T, ServiceError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ServiceError::Inference {
            context,
            source: anyhow::Error::new(e),
        })?
}

async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        models_loaded: state.store.models_loaded(),
    })
}

async fn predict_waste(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<QuantityResponse>, ApiError> {
    let started = Instant::now();
    let result = match parse_body::<QuantityRequest>(body) {
        Ok(request) => {
            let quantity = state.quantity.clone();
            run_blocking("Prediction failed", move || quantity.predict(&request)).await
        }
        Err(e) => Err(e),
    };
    if let Ok(response) = &result {
        state.logger.log_quantity_prediction(response);
    }
    state.finish("predict_waste", started, result)
}

async fn classify_waste(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let started = Instant::now();
    let result = match parse_body::<ClassifyRequest>(body) {
        Ok(request) => {
            let classifier = state.classifier.clone();
            run_blocking("Classification failed", move || classifier.classify(&request)).await
        }
        Err(e) => Err(e),
    };
    if let Ok(response) = &result {
        state.metrics.inc_waste_type(response.waste_type);
        state.logger.log_classification(response);
    }
    state.finish("classify_waste", started, result)
}

async fn score_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<EcoScoreResponse>, ApiError> {
    let started = Instant::now();
    let result = match parse_body::<EcoScoreRequest>(body) {
        Ok(request) => {
            let eco = state.eco.clone();
            run_blocking("Eco score calculation failed", move || eco.score(&request)).await
        }
        Err(e) => Err(e),
    };
    if let Ok(response) = &result {
        state.logger.log_eco_score(response);
    }
    state.finish("score_user", started, result)
}

/// Health check response - returns 200 if healthy or degraded, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.store.health();

    let status_code = match health.status {
        ComponentStatus::Healthy | ComponentStatus::Degraded => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Prometheus metrics endpoint
async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %e, "Failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Endpoint not found".to_string(),
        }),
    )
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
        }),
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", get(ping).fallback(method_not_allowed))
        .route(
            "/predict/waste",
            post(predict_waste).fallback(method_not_allowed),
        )
        .route(
            "/classify/waste",
            post(classify_waste).fallback(method_not_allowed),
        )
        .route("/score/user", post(score_user).fallback(method_not_allowed))
        .route("/healthz", get(healthz).fallback(method_not_allowed))
        .route("/metrics", get(metrics).fallback(method_not_allowed))
        .fallback(not_found)
        .with_state(state)
}

/// Resolves on Ctrl-C or SIGTERM and returns the signal name
pub async fn shutdown_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "SIGINT received",
        _ = terminate => "SIGTERM received",
    }
}

/// Start the API server and run until a shutdown signal arrives
pub async fn serve(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let logger = state.logger.clone();
    let app = create_router(state);

    info!(addr = %addr, "Starting API server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let reason = shutdown_signal().await;
            logger.log_shutdown(reason);
        })
        .await?;

    Ok(())
}
