use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use chunkscribe::application::ports::{
    TranscriptionEngine, TranscriptionError, TranscriptionOptions, TranscriptionRequest,
};
use chunkscribe::infrastructure::audio::OpenAiWhisperEngine;

type SeenFields = Arc<Mutex<HashMap<String, String>>>;

/// Whisper-compatible endpoint that records the text fields of each form.
async fn start_mock_whisper_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, SeenFields, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let seen: SeenFields = Arc::default();
    let recorder = seen.clone();

    let app = Router::new().route(
        "/v1/audio/transcriptions",
        post(move |headers: HeaderMap, mut multipart: Multipart| {
            let recorder = recorder.clone();
            async move {
                let authorised = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    == Some("Bearer test-key");
                if !authorised {
                    return (StatusCode::UNAUTHORIZED, "bad key").into_response();
                }

                while let Ok(Some(field)) = multipart.next_field().await {
                    let name = field.name().unwrap_or_default().to_string();
                    let value = if name == "file" {
                        format!("{} bytes", field.bytes().await.unwrap().len())
                    } else {
                        field.text().await.unwrap()
                    };
                    recorder.lock().unwrap().insert(name, value);
                }

                let status = StatusCode::from_u16(response_status).unwrap();
                (status, response_body).into_response()
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}/v1", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, seen, shutdown_tx)
}

fn request(options: TranscriptionOptions) -> TranscriptionRequest {
    TranscriptionRequest {
        audio: vec![0u8; 32],
        filename: "m-part1.mp3".to_string(),
        mime: "audio/mpeg",
        options,
    }
}

#[tokio::test]
async fn given_verbose_json_reply_when_transcribing_then_returns_timed_segments() {
    let body = r#"{"text": " Olá mundo", "segments": [{"text": " Olá", "start": 0.0, "end": 0.8}, {"text": " mundo", "start": 0.8, "end": 1.6}]}"#;
    let (base_url, _seen, shutdown_tx) = start_mock_whisper_server(200, body).await;
    let engine = OpenAiWhisperEngine::new("test-key".to_string(), Some(base_url), None);

    let result = engine
        .transcribe(request(TranscriptionOptions::default()))
        .await
        .unwrap();

    let segments = result.segments.unwrap();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1].text, " mundo");
    assert_eq!(segments[1].start_secs, 0.8);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_options_when_transcribing_then_form_carries_model_language_and_format() {
    let (base_url, seen, shutdown_tx) = start_mock_whisper_server(200, r#"{"text": "ok"}"#).await;
    let engine = OpenAiWhisperEngine::new(
        "test-key".to_string(),
        Some(format!("{}/", base_url)),
        Some("whisper-1".to_string()),
    );
    let options = TranscriptionOptions {
        language: Some("pt".to_string()),
        temperature: 0.0,
        segment_timestamps: true,
    };

    engine.transcribe(request(options)).await.unwrap();

    let fields = seen.lock().unwrap().clone();
    assert_eq!(fields.get("model").map(String::as_str), Some("whisper-1"));
    assert_eq!(fields.get("language").map(String::as_str), Some("pt"));
    assert_eq!(
        fields.get("response_format").map(String::as_str),
        Some("verbose_json")
    );
    assert_eq!(
        fields.get("timestamp_granularities[]").map(String::as_str),
        Some("segment")
    );
    assert_eq!(fields.get("temperature").map(String::as_str), Some("0"));
    assert_eq!(fields.get("file").map(String::as_str), Some("32 bytes"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_language_when_transcribing_then_language_field_is_omitted() {
    let (base_url, seen, shutdown_tx) = start_mock_whisper_server(200, r#"{"text": "ok"}"#).await;
    let engine = OpenAiWhisperEngine::new("test-key".to_string(), Some(base_url), None);

    engine
        .transcribe(request(TranscriptionOptions::default()))
        .await
        .unwrap();

    let fields = seen.lock().unwrap().clone();
    assert!(!fields.contains_key("language"));
    assert_eq!(
        fields.get("model").map(String::as_str),
        Some("whisper-large-v3-turbo")
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rejected_key_when_transcribing_then_returns_api_error_with_status() {
    let (base_url, _seen, shutdown_tx) = start_mock_whisper_server(200, r#"{"text": "ok"}"#).await;
    let engine = OpenAiWhisperEngine::new("wrong".to_string(), Some(base_url), None);

    let result = engine.transcribe(request(TranscriptionOptions::default())).await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(msg)) if msg.contains("401")));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_server_error_when_transcribing_then_returns_api_error() {
    let (base_url, _seen, shutdown_tx) =
        start_mock_whisper_server(503, r#"{"error": "overloaded"}"#).await;
    let engine = OpenAiWhisperEngine::new("test-key".to_string(), Some(base_url), None);

    let result = engine.transcribe(request(TranscriptionOptions::default())).await;

    assert!(matches!(result, Err(TranscriptionError::ApiRequestFailed(msg)) if msg.contains("overloaded")));
    shutdown_tx.send(()).ok();
}
