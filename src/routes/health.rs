//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub message: &'static str,
}

/// GET /check — always returns OK if the process is running.
pub async fn check() -> Json<HealthStatus> {
    Json(HealthStatus { message: "ok" })
}
