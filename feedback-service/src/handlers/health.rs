use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

/// Liveness: the process is up and serving.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "feedback-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness: the completion provider must accept our credential.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.feedback.is_ready().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
