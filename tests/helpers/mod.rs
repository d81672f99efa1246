#![allow(dead_code)]

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use bytes::Bytes;
use futures::stream::{self, BoxStream};

use chunkscribe::application::ports::{
    AudioSlicer, DurationProbe, MediaStore, ProbeError, SliceError, TranscriptionOptions,
};
use chunkscribe::application::services::{
    SegmentExtractor, SplitService, StorageJanitor, TranscribeService, TranscriptionDispatcher,
};
use chunkscribe::domain::{BatchId, SegmentSpan, StorageArea, StoragePath};
use chunkscribe::infrastructure::audio::MockTranscriptionEngine;
use chunkscribe::infrastructure::storage::LocalMediaStore;
use chunkscribe::presentation::{AppState, create_router};

pub const BOUNDARY: &str = "chunkscribe-test-boundary";
pub const TEST_HOST: &str = "example.test";

/// Reports the same duration for every file.
pub struct FixedProbe(pub f64);

#[async_trait]
impl DurationProbe for FixedProbe {
    async fn probe(&self, _path: &Path) -> Result<f64, ProbeError> {
        Ok(self.0)
    }
}

pub struct UnreadableProbe;

#[async_trait]
impl DurationProbe for UnreadableProbe {
    async fn probe(&self, _path: &Path) -> Result<f64, ProbeError> {
        Err(ProbeError::Unrecognised("not audio".to_string()))
    }
}

/// Writes a small text file per span instead of running a media tool.
#[derive(Default)]
pub struct FakeSlicer {
    failing: Vec<usize>,
    /// When set, ordinal `n` sleeps `(total - n) * 15ms` so later segments finish first.
    reverse_delay_total: Option<usize>,
    completed: Mutex<Vec<usize>>,
}

impl FakeSlicer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, ordinal: usize) -> Self {
        self.failing.push(ordinal);
        self
    }

    pub fn with_reverse_delays(mut self, total: usize) -> Self {
        self.reverse_delay_total = Some(total);
        self
    }

    /// Ordinals in the order their slices finished.
    pub fn completed(&self) -> Vec<usize> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioSlicer for FakeSlicer {
    async fn slice(
        &self,
        _source: &Path,
        span: &SegmentSpan,
        output: &Path,
    ) -> Result<(), SliceError> {
        if let Some(total) = self.reverse_delay_total {
            let steps = total.saturating_sub(span.ordinal) as u64;
            tokio::time::sleep(Duration::from_millis(steps * 15)).await;
        }

        self.completed.lock().unwrap().push(span.ordinal);

        if self.failing.contains(&span.ordinal) {
            return Err(SliceError::ToolFailed {
                status: "exit status: 1".to_string(),
                stderr: format!("cannot cut segment {}", span.ordinal),
            });
        }

        let content = format!(
            "segment {} {:.3}-{:.3}",
            span.ordinal,
            span.start_secs,
            span.end_secs()
        );
        tokio::fs::write(output, content).await?;
        Ok(())
    }

    fn output_extension(&self) -> &'static str {
        "mp3"
    }
}

pub fn create_test_store() -> (tempfile::TempDir, Arc<LocalMediaStore>) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalMediaStore::new(dir.path().to_path_buf()).unwrap();
    (dir, Arc::new(store))
}

pub fn byte_stream(content: Vec<u8>) -> BoxStream<'static, Result<Bytes, io::Error>> {
    Box::pin(stream::iter(vec![Ok(Bytes::from(content))]))
}

/// Stores `content` at `{area}/{batch}/{filename}`.
pub async fn put_file(
    store: &dyn MediaStore,
    area: StorageArea,
    batch: &BatchId,
    filename: &str,
    content: &str,
) -> StoragePath {
    let path = StoragePath::new(area, batch, filename);
    store
        .store(&path, byte_stream(content.as_bytes().to_vec()))
        .await
        .unwrap();
    path
}

pub struct TestApp {
    pub dir: tempfile::TempDir,
    pub store: Arc<LocalMediaStore>,
    pub engine: Arc<MockTranscriptionEngine>,
    pub router: Router,
}

pub fn build_app(
    probe: Arc<dyn DurationProbe>,
    slicer: FakeSlicer,
    engine: MockTranscriptionEngine,
    max_segment_bytes: u64,
) -> TestApp {
    let (dir, store) = create_test_store();
    let media_store: Arc<dyn MediaStore> = store.clone();
    let engine = Arc::new(engine);

    let janitor = StorageJanitor::new(Arc::clone(&media_store));
    let extractor = SegmentExtractor::new(Arc::new(slicer), Arc::clone(&media_store));
    let split_service = SplitService::new(
        Arc::clone(&media_store),
        probe,
        extractor,
        janitor.clone(),
        max_segment_bytes,
    );
    let dispatcher = TranscriptionDispatcher::new(
        engine.clone(),
        Arc::clone(&media_store),
        TranscriptionOptions::default(),
    );
    let transcribe_service =
        TranscribeService::new(Arc::clone(&media_store), dispatcher, janitor);

    let state = AppState {
        split_service: Arc::new(split_service),
        transcribe_service: Arc::new(transcribe_service),
        segments_dir: media_store.local_path(&StorageArea::Chunks.root()),
        public_base_url: None,
        max_upload_bytes: 64 * 1024 * 1024,
    };

    TestApp {
        dir,
        store,
        engine,
        router: create_router(state),
    }
}

pub fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn split_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/split-audio")
        .header(header::HOST, TEST_HOST)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::HOST, TEST_HOST)
        .body(Body::empty())
        .unwrap()
}

/// Waits for background cleanup to empty `area`.
pub async fn wait_until_empty(store: &dyn MediaStore, area: StorageArea) -> bool {
    for _ in 0..100 {
        if store.list(&area.root()).await.unwrap().is_empty() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}
