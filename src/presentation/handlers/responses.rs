use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Body of a successful split.
#[derive(Debug, Serialize, Deserialize)]
pub struct SplitResponse {
    pub message: String,
    pub batch_id: String,
    pub parts: Vec<String>,
}

/// Body of a successful transcription run.
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub message: String,
    pub total_parts: usize,
    pub transcription: String,
    pub failed_parts: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}
