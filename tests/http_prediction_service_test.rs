use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;
use winpredict::domain::errors::{FALLBACK_ERROR_MESSAGE, PredictionError};
use winpredict::domain::ports::PredictionService;
use winpredict::domain::prediction::PredictionRequest;
use winpredict::infrastructure::HttpPredictionService;
use winpredict::infrastructure::http_client_factory::HttpClientFactory;

#[derive(Clone, Default)]
struct Captured {
    body: Arc<Mutex<Option<String>>>,
    content_type: Arc<Mutex<Option<String>>>,
}

async fn capture_and_predict(
    State(captured): State<Captured>,
    headers: HeaderMap,
    body: String,
) -> Json<Value> {
    *captured.content_type.lock().unwrap() = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *captured.body.lock().unwrap() = Some(body);
    Json(json!({
        "win_probability": 0.734,
        "prediction": 1,
        "threshold": 0.5,
        "metadata": { "model": "logistic_regression", "metrics": null }
    }))
}

async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn service_for(addr: SocketAddr) -> HttpPredictionService {
    let base = format!("http://{}", addr);
    HttpPredictionService::new(
        HttpClientFactory::create_client(Some(Duration::from_secs(5)), Duration::from_secs(2)),
        Url::parse(&format!("{}/predict", base)).unwrap(),
        Url::parse(&format!("{}/health", base)).unwrap(),
    )
}

fn sample_request() -> PredictionRequest {
    PredictionRequest::from_form_entries(vec![
        ("kills", "12"),
        ("deaths", "3"),
        ("gold_earned", "not a number"),
    ])
}

#[tokio::test]
async fn test_predict_posts_json_and_parses_success() {
    let captured = Captured::default();
    let router = Router::new()
        .route("/predict", post(capture_and_predict))
        .with_state(captured.clone());
    let service = service_for(spawn_server(router).await);

    let response = service.predict(&sample_request()).await.unwrap();

    assert_eq!(response.win_probability, 0.734);
    assert_eq!(response.prediction, 1);
    assert_eq!(response.threshold, Some(0.5));
    assert_eq!(response.probability_text(), "73.4%");
    assert_eq!(
        response.metadata.as_ref().and_then(|m| m.model.as_deref()),
        Some("logistic_regression")
    );

    let body = captured.body.lock().unwrap().clone().unwrap();
    assert_eq!(body, r#"{"kills":12.0,"deaths":3.0,"gold_earned":null}"#);
    let content_type = captured.content_type.lock().unwrap().clone().unwrap();
    assert!(content_type.starts_with("application/json"));
}

#[tokio::test]
async fn test_rejection_carries_error_field_verbatim() {
    let router = Router::new().route(
        "/predict",
        post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad input" }))) }),
    );
    let service = service_for(spawn_server(router).await);

    let err = service.predict(&sample_request()).await.unwrap_err();

    assert_eq!(
        err,
        PredictionError::Rejected {
            status: 400,
            message: "bad input".to_string()
        }
    );
    assert_eq!(err.to_string(), "bad input");
}

#[tokio::test]
async fn test_rejection_without_error_field_uses_fallback() {
    let router = Router::new().route(
        "/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "boom" }))) }),
    );
    let service = service_for(spawn_server(router).await);

    let err = service.predict(&sample_request()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), FALLBACK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_non_json_body_is_invalid_body() {
    let router = Router::new().route(
        "/predict",
        post(|| async { "<html>Internal Server Error</html>" }),
    );
    let service = service_for(spawn_server(router).await);

    let err = service.predict(&sample_request()).await.unwrap_err();

    assert!(matches!(err, PredictionError::InvalidBody { .. }));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn test_success_status_with_wrong_shape_is_invalid_body() {
    let router = Router::new().route(
        "/predict",
        post(|| async { Json(json!({ "status": "ok" })) }),
    );
    let service = service_for(spawn_server(router).await);

    let err = service.predict(&sample_request()).await.unwrap_err();
    assert!(matches!(err, PredictionError::InvalidBody { .. }));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    // Bind then drop to get a port nobody listens on
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let service = service_for(addr);

    let err = service.predict(&sample_request()).await.unwrap_err();

    assert!(matches!(err, PredictionError::Transport { .. }));
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn test_health_reports_feature_order() {
    let router = Router::new().route(
        "/health",
        get(|| async { Json(json!({ "status": "ok", "features": ["kills", "deaths", "cs"] })) }),
    );
    let service = service_for(spawn_server(router).await);

    let health = service.health().await.unwrap();

    assert_eq!(health.status, "ok");
    assert_eq!(health.features, vec!["kills", "deaths", "cs"]);
}

#[tokio::test]
async fn test_health_failure_status() {
    let router = Router::new().route(
        "/health",
        get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let service = service_for(spawn_server(router).await);

    let err = service.health().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
}
