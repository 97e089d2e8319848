use super::*;
use axum::body::Body;
use axum::http::{header, HeaderMap, Request};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    app_with_cors(true)
}

fn app_with_cors(cors: bool) -> Router {
    let advisor = DeviceAdvisor::train(&TrainerConfig::default()).expect("training succeeds");
    router(Arc::new(advisor), cors)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body = serde_json::from_slice(&bytes).expect("JSON body");
    (status, headers, body)
}

async fn post_predict(body: &str) -> (StatusCode, Value) {
    let request = Request::post("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .expect("valid request");
    let (status, _, body) = send(app(), request).await;
    (status, body)
}

// ==================== ServerConfig ====================

#[test]
fn test_server_config_default() {
    let config = ServerConfig::default();
    assert_eq!(config.port, 5000);
    assert_eq!(config.host, "0.0.0.0");
    assert!(config.cors);
    assert_eq!(config.bind_addr(), "0.0.0.0:5000");
}

#[test]
fn test_server_config_builders() {
    let config = ServerConfig::default()
        .with_port(8080)
        .with_host("127.0.0.1")
        .with_cors(false);
    assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    assert!(!config.cors);
}

// ==================== POST /predict ====================

#[tokio::test]
async fn test_predict_training_row() {
    let (status, body) = post_predict(
        r#"{"edad_dispositivo": 1, "estado_bateria": 80, "rendimiento": 90, "frecuencia_reparacion": 0}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"recomendacion": "mantener"}));
}

#[tokio::test]
async fn test_predict_every_label_reachable() {
    for (body, expected) in [
        (r#"{"edad_dispositivo": 2, "estado_bateria": 70, "rendimiento": 75, "frecuencia_reparacion": 1}"#, "mantener"),
        (r#"{"edad_dispositivo": 3, "estado_bateria": 50, "rendimiento": 60, "frecuencia_reparacion": 2}"#, "vender"),
        (r#"{"edad_dispositivo": 5, "estado_bateria": 20, "rendimiento": 30, "frecuencia_reparacion": 3}"#, "cambiar"),
    ] {
        let (status, response) = post_predict(body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, json!({ "recomendacion": expected }), "{body}");
    }
}

#[tokio::test]
async fn test_predict_defaults_equal_explicit() {
    let (_, implicit) = post_predict(r#"{"edad_dispositivo": 2}"#).await;
    let (_, explicit) = post_predict(
        r#"{"edad_dispositivo": 2, "estado_bateria": 70, "rendimiento": 80, "frecuencia_reparacion": 0}"#,
    )
    .await;
    assert_eq!(implicit, explicit);
}

#[tokio::test]
async fn test_predict_is_idempotent() {
    let body = r#"{"edad_dispositivo": 4, "estado_bateria": 35}"#;
    let (_, first) = post_predict(body).await;
    for _ in 0..3 {
        let (_, again) = post_predict(body).await;
        assert_eq!(again, first);
    }
}

#[tokio::test]
async fn test_predict_negative_age() {
    let (status, body) = post_predict(
        r#"{"edad_dispositivo": -1, "estado_bateria": 80, "rendimiento": 90, "frecuencia_reparacion": 0}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Edad del dispositivo no válida."}));
}

#[tokio::test]
async fn test_predict_missing_age() {
    let (status, body) = post_predict(r#"{"estado_bateria": 80}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Edad del dispositivo no válida.");
}

#[tokio::test]
async fn test_predict_malformed_json() {
    let (status, body) = post_predict("{\"edad_dispositivo\": ").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().expect("error string");
    assert!(!message.is_empty());
}

#[tokio::test]
async fn test_predict_non_numeric_field() {
    let (status, body) = post_predict(r#"{"edad_dispositivo": 2, "rendimiento": "alto"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().is_some_and(|m| m.contains("alto")));
}

#[tokio::test]
async fn test_predict_without_content_type() {
    let request = Request::post("/predict")
        .body(Body::from(r#"{"edad_dispositivo": 1, "estado_bateria": 80, "rendimiento": 90}"#))
        .expect("valid request");
    let (status, _, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recomendacion"], "mantener");
}

// ==================== Other routes ====================

#[tokio::test]
async fn test_health() {
    let request = Request::get("/health").body(Body::empty()).expect("valid request");
    let (status, _, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_model_summary() {
    let request = Request::get("/model").body(Body::empty()).expect("valid request");
    let (status, _, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["algorithm"], "cart");
    assert_eq!(body["labels"], json!(["mantener", "vender", "cambiar"]));
    assert_eq!(body["depth"], 2);
    assert_eq!(body["train_samples"], 3);
    assert_eq!(body["holdout_samples"], 2);
}

// ==================== CORS ====================

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let request = Request::post("/predict")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::from(r#"{"edad_dispositivo": 2}"#))
        .expect("valid request");
    let (_, headers, _) = send(app(), request).await;
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let request = Request::post("/predict")
        .header(header::ORIGIN, "http://example.com")
        .body(Body::from(r#"{"edad_dispositivo": 2}"#))
        .expect("valid request");
    let (_, headers, _) = send(app_with_cors(false), request).await;
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

// ==================== ApiError ====================

#[tokio::test]
async fn test_internal_errors_are_not_leaked() {
    let response = ApiError::from(AdvisorError::NotFitted).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body: Value = serde_json::from_slice(&bytes).expect("JSON body");
    assert_eq!(body, json!({"error": INTERNAL_ERROR_MESSAGE}));
}
