use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::application::ports::{MediaStore, MediaStoreError};
use crate::domain::{
    AudioFormat, BatchId, SegmentArtifact, SegmentResult, StorageArea, StoragePath, Transcript,
};

use super::storage_janitor::{CleanupReport, StorageJanitor};
use super::transcription_dispatcher::TranscriptionDispatcher;

/// Which published batches a transcription run picks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscribeScope {
    All,
    Batch(BatchId),
}

#[derive(Debug)]
pub struct TranscriptionRun {
    pub transcript: Transcript,
    pub results: Vec<SegmentResult>,
    /// Batches whose files were scanned; these are the ones to clean up.
    pub batches: Vec<BatchId>,
}

pub struct TranscribeService {
    store: Arc<dyn MediaStore>,
    dispatcher: TranscriptionDispatcher,
    janitor: StorageJanitor,
}

impl TranscribeService {
    pub fn new(
        store: Arc<dyn MediaStore>,
        dispatcher: TranscriptionDispatcher,
        janitor: StorageJanitor,
    ) -> Self {
        Self {
            store,
            dispatcher,
            janitor,
        }
    }

    pub async fn transcribe(
        &self,
        scope: TranscribeScope,
    ) -> Result<TranscriptionRun, TranscribeAllError> {
        let files = self.scan(scope).await?;
        if files.is_empty() {
            return Err(TranscribeAllError::NothingToTranscribe);
        }

        tracing::info!(files = files.len(), "Starting transcription");

        let artifacts: Vec<SegmentArtifact> = files
            .iter()
            .enumerate()
            .map(|(i, path)| SegmentArtifact {
                ordinal: i + 1,
                filename: path.file_name().to_string(),
                location: path.clone(),
            })
            .collect();

        let results = self.dispatcher.transcribe(&artifacts).await;
        let transcript = Transcript::assemble(&results);

        let mut batches: Vec<BatchId> = files.iter().filter_map(StoragePath::batch_id).collect();
        batches.dedup();

        tracing::info!(
            total_parts = transcript.total_parts,
            failed_parts = transcript.failed_parts.len(),
            chars = transcript.text.len(),
            "Transcription assembled"
        );

        Ok(TranscriptionRun {
            transcript,
            results,
            batches,
        })
    }

    /// Runs cleanup for `batches` in the background.
    pub fn spawn_cleanup(&self, batches: Vec<BatchId>) -> JoinHandle<CleanupReport> {
        let janitor = self.janitor.clone();
        tokio::spawn(async move { janitor.cleanup(&batches).await })
    }

    /// Supported audio files of the published area, in lexicographic order.
    async fn scan(&self, scope: TranscribeScope) -> Result<Vec<StoragePath>, TranscribeAllError> {
        let prefix = match scope {
            TranscribeScope::All => StorageArea::Chunks.root(),
            TranscribeScope::Batch(batch) => StorageArea::Chunks.batch_prefix(&batch),
        };

        let mut files: Vec<StoragePath> = self
            .store
            .list(&prefix)
            .await?
            .into_iter()
            .filter(|path| path.batch_id().is_some())
            .filter(|path| AudioFormat::from_filename(path.file_name()).is_some())
            .collect();
        files.sort();

        Ok(files)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscribeAllError {
    #[error("no audio files found to transcribe")]
    NothingToTranscribe,
    #[error("failed to scan segment storage: {0}")]
    Scan(#[from] MediaStoreError),
}
