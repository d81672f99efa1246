use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::application::ports::{DurationProbe, MediaStore, MediaStoreError, ProbeError};
use crate::domain::{
    AudioFormat, BatchId, MediaId, PartitionPlan, PlanError, SegmentArtifact, SourceMedia,
    StorageArea, StoragePath, sanitize_filename,
};

use super::segment_extractor::{ExtractionError, SegmentExtractor};
use super::storage_janitor::StorageJanitor;

/// Stores an upload, plans its segments, extracts them and publishes the batch.
///
/// All-or-nothing: on any failure the batch namespace is removed again.
pub struct SplitService {
    store: Arc<dyn MediaStore>,
    probe: Arc<dyn DurationProbe>,
    extractor: SegmentExtractor,
    janitor: StorageJanitor,
    max_segment_bytes: u64,
}

#[derive(Debug)]
pub struct SplitOutcome {
    pub source: SourceMedia,
    pub plan: PartitionPlan,
    /// Published segments, in ordinal order.
    pub segments: Vec<SegmentArtifact>,
}

impl SplitService {
    pub fn new(
        store: Arc<dyn MediaStore>,
        probe: Arc<dyn DurationProbe>,
        extractor: SegmentExtractor,
        janitor: StorageJanitor,
        max_segment_bytes: u64,
    ) -> Self {
        Self {
            store,
            probe,
            extractor,
            janitor,
            max_segment_bytes,
        }
    }

    pub async fn split(
        &self,
        filename: &str,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<SplitOutcome, SplitError> {
        let filename = sanitize_filename(filename);
        if AudioFormat::from_filename(&filename).is_none() {
            return Err(InputError::UnsupportedFormat(filename).into());
        }

        let batch_id = BatchId::new();
        let media_id = MediaId::new();
        let location = StoragePath::new(
            StorageArea::Uploads,
            &batch_id,
            &format!("{}-{}", media_id, filename),
        );

        let result = self
            .run(batch_id, media_id, filename, location, stream)
            .await;

        if let Err(e) = &result {
            tracing::warn!(batch_id = %batch_id, error = %e, "Split failed, discarding batch");
            self.janitor.cleanup(&[batch_id]).await;
        }

        result
    }

    async fn run(
        &self,
        batch_id: BatchId,
        media_id: MediaId,
        filename: String,
        location: StoragePath,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<SplitOutcome, SplitError> {
        let written = self
            .store
            .store(&location, stream)
            .await
            .map_err(|e| match e {
                MediaStoreError::SourceRead(reason) => {
                    SplitError::Input(InputError::Unreadable(reason))
                }
                other => SplitError::Storage(other),
            })?;
        if written == 0 {
            return Err(InputError::EmptyPayload.into());
        }

        let size_bytes = self
            .store
            .head(&location)
            .await
            .map_err(SplitError::SizeProbe)?;

        let duration_secs = self
            .probe
            .probe(&self.store.local_path(&location))
            .await?;

        let plan = PartitionPlan::compute(size_bytes, duration_secs, self.max_segment_bytes)?;

        tracing::info!(
            batch_id = %batch_id,
            filename = %filename,
            size_mb = %format_args!("{:.2}", size_bytes as f64 / 1024.0 / 1024.0),
            duration_secs,
            segments = plan.segment_count(),
            "Audio received, splitting"
        );

        let source = SourceMedia {
            id: media_id,
            batch_id,
            filename,
            location,
            size_bytes,
            duration_secs,
        };

        let staged = self
            .extractor
            .extract(&source, &plan, StorageArea::Staging)
            .await?;

        self.store
            .rename_dir(
                &StorageArea::Staging.batch_prefix(&batch_id),
                &StorageArea::Chunks.batch_prefix(&batch_id),
            )
            .await
            .map_err(SplitError::Publish)?;

        let segments = staged
            .into_iter()
            .map(|artifact| SegmentArtifact {
                location: StoragePath::new(StorageArea::Chunks, &batch_id, &artifact.filename),
                ..artifact
            })
            .collect();

        Ok(SplitOutcome {
            source,
            plan,
            segments,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("no file was uploaded, expected field \"audio\"")]
    MissingPayload,
    #[error("uploaded file is empty")]
    EmptyPayload,
    #[error("unsupported audio file: {0}")]
    UnsupportedFormat(String),
    #[error("failed to read upload: {0}")]
    Unreadable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("{0}")]
    Input(#[from] InputError),
    #[error("failed to store upload: {0}")]
    Storage(MediaStoreError),
    #[error("failed to read file size: {0}")]
    SizeProbe(MediaStoreError),
    #[error("failed to read audio duration: {0}")]
    DurationProbe(#[from] ProbeError),
    #[error("cannot plan segments: {0}")]
    Plan(#[from] PlanError),
    #[error("failed to split audio: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("failed to publish segments: {0}")]
    Publish(MediaStoreError),
}
