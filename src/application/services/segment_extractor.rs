use std::sync::Arc;

use futures::future::join_all;

use crate::application::ports::{AudioSlicer, MediaStore, MediaStoreError, SliceError};
use crate::domain::{
    PartitionPlan, SegmentArtifact, SourceMedia, StorageArea, StoragePath, segment_filename,
};

/// Cuts a source into one file per plan entry, all segments at once.
#[derive(Clone)]
pub struct SegmentExtractor {
    slicer: Arc<dyn AudioSlicer>,
    store: Arc<dyn MediaStore>,
}

impl SegmentExtractor {
    pub fn new(slicer: Arc<dyn AudioSlicer>, store: Arc<dyn MediaStore>) -> Self {
        Self { slicer, store }
    }

    /// Every slice is awaited before returning, so the first failure by
    /// ordinal is reported even when a later segment failed sooner.
    /// The returned artifacts are always in plan order.
    pub async fn extract(
        &self,
        source: &SourceMedia,
        plan: &PartitionPlan,
        area: StorageArea,
    ) -> Result<Vec<SegmentArtifact>, ExtractionError> {
        self.store
            .ensure_dir(&area.batch_prefix(&source.batch_id))
            .await
            .map_err(ExtractionError::Storage)?;

        let source_path = self.store.local_path(&source.location);
        let width = plan.ordinal_width();
        let extension = self.slicer.output_extension();

        tracing::debug!(
            segments = plan.segment_count(),
            source = %source.location,
            "Launching segment extraction"
        );

        let tasks = plan.spans().iter().map(|span| {
            let filename = segment_filename(&source.id, span.ordinal, width, extension);
            let location = StoragePath::new(area, &source.batch_id, &filename);
            let output = self.store.local_path(&location);
            let source_path = &source_path;

            async move {
                match self.slicer.slice(source_path, span, &output).await {
                    Ok(()) => {
                        tracing::debug!(
                            ordinal = span.ordinal,
                            start_secs = span.start_secs,
                            duration_secs = span.duration_secs,
                            filename = %filename,
                            "Segment extracted"
                        );
                        Ok(SegmentArtifact {
                            ordinal: span.ordinal,
                            filename,
                            location,
                        })
                    }
                    Err(cause) => {
                        tracing::error!(ordinal = span.ordinal, error = %cause, "Segment extraction failed");
                        Err(ExtractionError::Segment {
                            ordinal: span.ordinal,
                            cause,
                        })
                    }
                }
            }
        });

        join_all(tasks).await.into_iter().collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("segment {ordinal}: {cause}")]
    Segment { ordinal: usize, cause: SliceError },
    #[error("storage: {0}")]
    Storage(MediaStoreError),
}
