//! Serve command implementation
//!
//! Trains the advisor once at startup and serves it over HTTP:
//! - `POST /predict` - recommendation for one device profile
//! - `GET  /health`  - liveness check
//! - `GET  /model`   - fitted tree summary

use crate::error::{CliError, Result};
use crate::output;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use colored::Colorize;
use device_advisor::advisor::{
    DeviceAdvisor, ErrorResponse, ModelSummary, PredictRequest, PredictResponse, TrainerConfig,
};
use device_advisor::AdvisorError;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

/// Message sent instead of internal error details.
const INTERNAL_ERROR_MESSAGE: &str = "Error interno al calcular la recomendación.";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Host to bind to
    pub host: String,
    /// Allow cross-origin requests from any origin
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            host: "0.0.0.0".to_string(),
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Create config with custom port
    pub(crate) fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Create config with custom host
    pub(crate) fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Enable or disable CORS
    pub(crate) fn with_cors(mut self, cors: bool) -> Self {
        self.cors = cors;
        self
    }

    /// Get bind address
    pub(crate) fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read-only model shared by every request.
pub(crate) type SharedAdvisor = Arc<DeviceAdvisor>;

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub(crate) struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Handler failure, rendered as `{"error": ...}`.
#[derive(Debug)]
pub(crate) struct ApiError(AdvisorError);

impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            err @ AdvisorError::InvalidDeviceAge(_) => (StatusCode::BAD_REQUEST, err.to_string()),
            AdvisorError::MalformedRequest(detail) => {
                warn!(error = %detail, "rejected request body");
                (StatusCode::INTERNAL_SERVER_ERROR, detail)
            }
            err => {
                error!(error = %err, "prediction failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// `POST /predict`
///
/// The body is decoded by hand rather than through the `Json` extractor so
/// that malformed bodies get the same `{"error": ...}` shape as every other
/// failure.
pub(crate) async fn predict_handler(
    State(advisor): State<SharedAdvisor>,
    body: Bytes,
) -> std::result::Result<Json<PredictResponse>, ApiError> {
    let request = PredictRequest::from_json(&body)?;
    let recommendation = advisor.predict(request)?;
    Ok(Json(PredictResponse { recommendation }))
}

/// `GET /health`
pub(crate) async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /model`
pub(crate) async fn model_handler(
    State(advisor): State<SharedAdvisor>,
) -> std::result::Result<Json<ModelSummary>, ApiError> {
    Ok(Json(advisor.summary()?))
}

/// Builds the application router around a trained advisor.
pub(crate) fn router(advisor: SharedAdvisor, cors: bool) -> Router {
    let app = Router::new()
        .route("/predict", post(predict_handler))
        .route("/health", get(health_handler))
        .route("/model", get(model_handler))
        .with_state(advisor);

    if cors {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
    } else {
        app
    }
}

/// Serve command entry point (blocking)
pub(crate) fn run(config: &ServerConfig, trainer: &TrainerConfig) -> Result<()> {
    println!("{}", "=== Device Advisor Serve ===".cyan().bold());
    println!();
    output::kv("Binding", config.bind_addr());
    output::kv("CORS", if config.cors { "any origin" } else { "disabled" });

    let advisor: SharedAdvisor = Arc::new(DeviceAdvisor::train(trainer)?);
    let summary = advisor.summary()?;
    output::kv(
        "Model",
        format!(
            "CART/gini, depth {}, {} leaves, {} train / {} holdout rows",
            summary.depth, summary.leaves, summary.train_samples, summary.holdout_samples
        ),
    );

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Server(format!("Failed to create runtime: {e}")))?;

    let bind_addr = config.bind_addr();
    let app = router(advisor, config.cors);

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind {bind_addr}: {e}")))?;

        info!(addr = %bind_addr, "listening");
        println!();
        println!(
            "{}",
            format!("Server listening on http://{bind_addr}")
                .green()
                .bold()
        );
        println!();
        println!("{}", "Endpoints:".cyan());
        output::endpoint("POST", "/predict", "Device recommendation");
        output::endpoint("GET", "/health", "Health check");
        output::endpoint("GET", "/model", "Fitted tree summary");
        println!();
        println!("{}", "Press Ctrl+C to stop".dimmed());

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| CliError::Server(format!("Server error: {e}")))?;

        println!();
        println!("{}", "Server stopped".yellow());
        Ok(())
    })
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[cfg(test)]
#[path = "serve_tests.rs"]
mod tests;
