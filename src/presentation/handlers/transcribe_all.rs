use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::services::{TranscribeAllError, TranscribeScope};
use crate::domain::BatchId;
use crate::presentation::handlers::responses::{TranscribeResponse, error_response};
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn transcribe_all_handler(State(state): State<AppState>) -> Response {
    transcribe(&state, TranscribeScope::All).await
}

#[tracing::instrument(skip(state))]
pub async fn transcribe_batch_handler(
    State(state): State<AppState>,
    Path(batch_id): Path<String>,
) -> Response {
    match BatchId::parse(&batch_id) {
        Some(batch) => transcribe(&state, TranscribeScope::Batch(batch)).await,
        None => error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid batch ID: {}", batch_id),
        ),
    }
}

async fn transcribe(state: &AppState, scope: TranscribeScope) -> Response {
    match state.transcribe_service.transcribe(scope).await {
        Ok(run) => {
            if run.transcript.is_empty() {
                tracing::warn!(
                    scope = ?scope,
                    total_parts = run.transcript.total_parts,
                    failed_parts = run.transcript.failed_parts.len(),
                    "Transcription produced no text"
                );
            }

            let message = match scope {
                TranscribeScope::All => "Transcription of all stored parts complete".to_string(),
                TranscribeScope::Batch(batch) => {
                    format!("Transcription of batch {} complete", batch)
                }
            };
            let response = TranscribeResponse {
                message,
                total_parts: run.transcript.total_parts,
                transcription: run.transcript.text,
                failed_parts: run.transcript.failed_parts,
            };

            // response is built; cleanup runs in the background
            state.transcribe_service.spawn_cleanup(run.batches);

            (StatusCode::OK, Json(response)).into_response()
        }
        Err(TranscribeAllError::NothingToTranscribe) => {
            tracing::warn!(scope = ?scope, "No audio files found for transcription");
            error_response(
                StatusCode::NOT_FOUND,
                TranscribeAllError::NothingToTranscribe.to_string(),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Transcription run failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to transcribe stored parts: {}", e),
            )
        }
    }
}
