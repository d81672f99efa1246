use std::io;

use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures::{StreamExt, TryStreamExt};

use crate::application::services::{InputError, SplitError, SplitOutcome};
use crate::presentation::handlers::responses::{SplitResponse, error_response};
use crate::presentation::state::AppState;

const AUDIO_FIELD: &str = "audio";
const FORWARDED_PROTO: &str = "x-forwarded-proto";

#[tracing::instrument(skip(state, headers, multipart))]
pub async fn split_audio_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => {
                tracing::warn!("Split request without an audio field");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    InputError::MissingPayload.to_string(),
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                );
            }
        };

        if field.name() != Some(AUDIO_FIELD) {
            tracing::debug!(field = ?field.name(), "Ignoring multipart field");
            continue;
        }

        return split_field(&state, &headers, field).await;
    }
}

async fn split_field(state: &AppState, headers: &HeaderMap, field: Field<'_>) -> Response {
    let filename = field.file_name().unwrap_or("upload").to_string();
    tracing::info!(filename = %filename, "Audio received");

    let stream = field.map_err(io::Error::other).boxed();

    match state.split_service.split(&filename, stream).await {
        Ok(outcome) => {
            let base_url = public_base_url(state, headers);
            let response = split_response(&outcome, &base_url);
            tracing::info!(
                batch_id = %outcome.source.batch_id,
                parts = response.parts.len(),
                "Split completed"
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            let status = split_error_status(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, "Split failed");
            } else {
                tracing::warn!(error = %e, "Split rejected");
            }
            error_response(status, e.to_string())
        }
    }
}

pub fn split_response(outcome: &SplitOutcome, base_url: &str) -> SplitResponse {
    let parts = outcome
        .segments
        .iter()
        .map(|segment| {
            format!(
                "{}/chunks/{}",
                base_url,
                segment.location.relative_to_area()
            )
        })
        .collect::<Vec<_>>();

    SplitResponse {
        message: format!(
            "Audio split into {} part(s) ({} MB)",
            parts.len(),
            (outcome.source.size_bytes as f64 / 1024.0 / 1024.0).round()
        ),
        batch_id: outcome.source.batch_id.to_string(),
        parts,
    }
}

pub fn split_error_status(error: &SplitError) -> StatusCode {
    match error {
        SplitError::Input(InputError::UnsupportedFormat(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        SplitError::Input(_) => StatusCode::BAD_REQUEST,
        SplitError::Plan(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SplitError::Storage(_)
        | SplitError::SizeProbe(_)
        | SplitError::DurationProbe(_)
        | SplitError::Extraction(_)
        | SplitError::Publish(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_base_url(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(base) = &state.public_base_url {
        return base.trim_end_matches('/').to_string();
    }

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("{}://{}", scheme, host)
}
