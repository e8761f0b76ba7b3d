//! Integration tests for the ml-service HTTP endpoints

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use ml_service::api::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use waste_ml_lib::predictor::{ClassPrediction, Classifier, LabelDecoder, LinearRegressor, Regressor};
use waste_ml_lib::{EcoScoreConfig, ModelStore};

struct FixedClassifier(ClassPrediction);

impl Classifier for FixedClassifier {
    fn predict(&self, _features: &[f32]) -> anyhow::Result<ClassPrediction> {
        Ok(self.0.clone())
    }

    fn kind(&self) -> &'static str {
        "fixed"
    }
}

struct FailingRegressor;

impl Regressor for FailingRegressor {
    fn predict(&self, _features: &[f32]) -> anyhow::Result<f32> {
        anyhow::bail!("output tensor is empty")
    }

    fn kind(&self) -> &'static str {
        "failing"
    }
}

fn decoder() -> LabelDecoder {
    LabelDecoder::new(
        ["DRY", "E_WASTE", "HAZARDOUS", "WET"]
            .iter()
            .map(|l| l.to_string())
            .collect(),
    )
}

fn classifier(class_idx: usize, probabilities: Vec<f32>) -> Arc<dyn Classifier> {
    Arc::new(FixedClassifier(ClassPrediction {
        class_idx,
        probabilities,
    }))
}

/// Store with every artifact present
fn full_store() -> ModelStore {
    ModelStore::builder()
        .quantity_model(Arc::new(LinearRegressor {
            coefficients: vec![0.0, 0.0, 0.0, 1.1],
            intercept: 0.0,
        }))
        .classification_model(classifier(3, vec![0.05, 0.05, 0.03, 0.87]))
        .label_decoder(decoder())
        .eco_config(EcoScoreConfig::default())
        .build()
}

fn setup_app(store: ModelStore) -> Router {
    create_router(Arc::new(AppState::new(Arc::new(store))))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

#[tokio::test]
async fn test_ping_reports_models_loaded() {
    let (status, body) = send(setup_app(full_store()), Method::GET, "/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"status": "ok", "service": "ml-service", "models_loaded": true})
    );

    let (status, body) = send(
        setup_app(ModelStore::builder().build()),
        Method::GET,
        "/ping",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["models_loaded"], false);
}

#[tokio::test]
async fn test_predict_waste() {
    let (status, body) = post(
        setup_app(full_store()),
        "/predict/waste",
        json!({"zoneId": 1, "historicalWaste": 150.0, "dayOfWeek": 3, "month": 11}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predictedWasteKg"], 165.0);
    assert_eq!(body["zoneId"], 1);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_predict_waste_validation() {
    let cases = [
        (json!({"zoneId": 1}), "zoneId and historicalWaste are required"),
        (
            json!({"zoneId": 0, "historicalWaste": 1.0}),
            "zoneId must be between 1 and 100",
        ),
        (
            json!({"zoneId": 5, "historicalWaste": 1.0, "dayOfWeek": 7}),
            "dayOfWeek must be between 0 (Monday) and 6 (Sunday)",
        ),
        (
            json!({"zoneId": 5, "historicalWaste": 1.0, "month": 13}),
            "month must be between 1 and 12",
        ),
        (
            json!({"zoneId": 5, "historicalWaste": -1.0}),
            "historicalWaste must be non-negative",
        ),
        (json!({}), "Request body is required"),
    ];

    for (request, message) in cases {
        let (status, body) = post(setup_app(full_store()), "/predict/waste", request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": message }));
    }
}

#[tokio::test]
async fn test_predict_waste_without_model() {
    let store = ModelStore::builder()
        .eco_config(EcoScoreConfig::default())
        .build();

    let (status, body) = post(
        setup_app(store),
        "/predict/waste",
        json!({"zoneId": 1, "historicalWaste": 10.0}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Waste quantity model not loaded");
}

#[tokio::test]
async fn test_predict_waste_inference_failure() {
    let store = ModelStore::builder()
        .quantity_model(Arc::new(FailingRegressor))
        .build();

    let (status, body) = post(
        setup_app(store),
        "/predict/waste",
        json!({"zoneId": 1, "historicalWaste": 10.0}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Prediction failed: output tensor is empty");
}

#[tokio::test]
async fn test_classify_waste() {
    let (status, body) = post(
        setup_app(full_store()),
        "/classify/waste",
        json!({"description": "vegetable peels and fruit", "category": "ORGANIC"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wasteType"], "WET");
    assert_eq!(body["confidence"], 0.87);
}

#[tokio::test]
async fn test_classify_unknown_label_falls_back_to_dry() {
    let store = ModelStore::builder()
        .classification_model(classifier(1, vec![0.4, 0.6]))
        .label_decoder(LabelDecoder::new(vec!["WET".into(), "GLASS".into()]))
        .build();

    let (status, body) = post(
        setup_app(store),
        "/classify/waste",
        json!({"description": "broken jars"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wasteType"], "DRY");
    assert_eq!(body["confidence"], 0.6);
}

#[tokio::test]
async fn test_classify_without_decoder() {
    let store = ModelStore::builder()
        .classification_model(classifier(0, vec![1.0]))
        .build();

    let (status, body) = post(
        setup_app(store),
        "/classify/waste",
        json!({"description": "bottle"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Waste classification model not loaded");
}

#[tokio::test]
async fn test_score_user_reference_example() {
    let (status, body) = post(
        setup_app(full_store()),
        "/score/user",
        json!({
            "userId": 123,
            "userActivity": 15,
            "segregationAccuracy": 85,
            "requestFrequency": 8,
            "avgWeight": 5.5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ecoScore"], 77);
    assert_eq!(body["userId"], 123);
    assert_eq!(
        body["breakdown"],
        json!({
            "activityScore": 30.0,
            "segregationScore": 25.5,
            "frequencyScore": 15.0,
            "weightScore": 7.0
        })
    );
}

#[tokio::test]
async fn test_score_user_works_without_models() {
    let (status, body) = post(
        setup_app(ModelStore::builder().build()),
        "/score/user",
        json!({"userId": 7}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // defaults to zero activity: lowest frequency and weight tiers only
    assert_eq!(body["ecoScore"], 7);
}

#[tokio::test]
async fn test_score_user_validation() {
    let cases = [
        (json!({"userActivity": 3}), "userId is required"),
        (
            json!({"userId": 1, "segregationAccuracy": 101}),
            "segregationAccuracy must be between 0 and 100",
        ),
        (
            json!({"userId": 1, "userActivity": -1}),
            "userActivity must be non-negative",
        ),
        (
            json!({"userId": 1, "requestFrequency": -1}),
            "requestFrequency must be non-negative",
        ),
        (
            json!({"userId": 1, "avgWeight": -0.5}),
            "avgWeight must be non-negative",
        ),
    ];

    for (request, message) in cases {
        let (status, body) = post(setup_app(full_store()), "/score/user", request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], message);
    }
}

#[tokio::test]
async fn test_wrong_field_type_is_bad_request() {
    let (status, body) = post(
        setup_app(full_store()),
        "/score/user",
        json!({"userId": "abc"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body: "));
}

#[tokio::test]
async fn test_missing_body_is_bad_request() {
    let (status, body) = send(setup_app(full_store()), Method::POST, "/score/user", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Request body is required");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, body) = send(setup_app(full_store()), Method::GET, "/predict/zone", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Endpoint not found"}));
}

#[tokio::test]
async fn test_wrong_method_is_405_with_error_body() {
    let (status, body) = send(setup_app(full_store()), Method::GET, "/score/user", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"error": "Method not allowed"}));

    let (status, body) = post(setup_app(full_store()), "/healthz", json!({"a": 1})).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");
}

#[tokio::test]
async fn test_healthz_returns_ok_when_healthy() {
    let (status, body) = send(setup_app(full_store()), Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["components"]["quantity_model"]["status"], "healthy");
}

#[tokio::test]
async fn test_healthz_returns_ok_when_degraded() {
    let store = ModelStore::builder()
        .quantity_model(Arc::new(FailingRegressor))
        .build();

    let (status, body) = send(setup_app(store), Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(
        body["components"]["classification_model"]["status"],
        "unhealthy"
    );
}

#[tokio::test]
async fn test_healthz_returns_503_when_unhealthy() {
    let store = ModelStore::builder()
        .eco_config(EcoScoreConfig::default())
        .build();

    let (status, body) = send(setup_app(store), Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup_app(full_store());
    post(
        app.clone(),
        "/classify/waste",
        json!({"description": "food scraps"}),
    )
    .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("ml_service_requests_total"));
    assert!(text.contains("ml_service_waste_type_total"));
    assert!(text.contains("ml_service_models_loaded"));
}
