use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Healthy while the media store root (parent of the segment area) is reachable.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let storage_root = state.segments_dir.parent().unwrap_or(&state.segments_dir);
    let reachable = tokio::fs::try_exists(storage_root).await.unwrap_or(false);

    let (status, label) = if reachable {
        (StatusCode::OK, "healthy")
    } else {
        tracing::warn!(root = %storage_root.display(), "Media storage root is not reachable");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
