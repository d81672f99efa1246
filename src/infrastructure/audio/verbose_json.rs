use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{TranscriptionError, TranscriptionRequest, TranscriptionResponse};
use crate::domain::Fragment;

/// Body of an OpenAI-style `verbose_json` transcription.
#[derive(Debug, Deserialize)]
pub struct VerboseTranscription {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub segments: Option<Vec<VerboseSegment>>,
}

#[derive(Debug, Deserialize)]
pub struct VerboseSegment {
    pub text: String,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
}

impl From<VerboseTranscription> for TranscriptionResponse {
    fn from(body: VerboseTranscription) -> Self {
        Self {
            text: body.text,
            segments: body.segments.map(|segments| {
                segments
                    .into_iter()
                    .map(|s| Fragment {
                        text: s.text,
                        start_secs: s.start,
                        end_secs: s.end,
                    })
                    .collect()
            }),
        }
    }
}

/// Maps a non-2xx status to `ApiRequestFailed` and parses the body otherwise.
pub async fn read_response(
    response: reqwest::Response,
) -> Result<TranscriptionResponse, TranscriptionError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TranscriptionError::ApiRequestFailed(format!("body: {}", e)))?;

    if !status.is_success() {
        return Err(TranscriptionError::ApiRequestFailed(format!(
            "status {}: {}",
            status,
            body.trim()
        )));
    }

    parse_body(&body)
}

pub fn parse_body(body: &str) -> Result<TranscriptionResponse, TranscriptionError> {
    serde_json::from_str::<VerboseTranscription>(body)
        .map(TranscriptionResponse::from)
        .map_err(|e| TranscriptionError::MalformedResponse(format!("parse response: {}", e)))
}

/// Multipart form shared by the OpenAI-compatible endpoints. `model` is
/// omitted for deployments that pin the model in the URL.
pub fn build_form(
    request: TranscriptionRequest,
    model: Option<&str>,
) -> Result<multipart::Form, TranscriptionError> {
    let options = request.options;
    let file_part = multipart::Part::bytes(request.audio)
        .file_name(request.filename)
        .mime_str(request.mime)
        .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

    let mut form = multipart::Form::new()
        .text("response_format", "verbose_json")
        .text("temperature", options.temperature.to_string())
        .part("file", file_part);

    if let Some(model) = model {
        form = form.text("model", model.to_string());
    }
    if options.segment_timestamps {
        form = form.text("timestamp_granularities[]", "segment");
    }
    if let Some(language) = options.language {
        form = form.text("language", language);
    }

    Ok(form)
}
