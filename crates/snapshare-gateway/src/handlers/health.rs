use crate::model::HealthResponse;
use axum::Json;

/// `GET /health`: liveness only; the store is not probed.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
