//! Liveness endpoint.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let healthy = state.blob_store.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        store: state.blob_store.store_type().to_string(),
    })
}
