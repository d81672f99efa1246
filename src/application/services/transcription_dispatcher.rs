use std::sync::Arc;

use crate::application::ports::{
    MediaStore, MediaStoreError, TranscriptionEngine, TranscriptionError, TranscriptionOptions,
    TranscriptionRequest, TranscriptionResponse,
};
use crate::domain::{AudioFormat, SegmentArtifact, SegmentOutcome, SegmentResult};

/// Sends segments to the transcription engine one at a time, in ordinal order.
///
/// A failing segment is recorded and skipped; it never stops the batch.
pub struct TranscriptionDispatcher {
    engine: Arc<dyn TranscriptionEngine>,
    store: Arc<dyn MediaStore>,
    options: TranscriptionOptions,
}

impl TranscriptionDispatcher {
    pub fn new(
        engine: Arc<dyn TranscriptionEngine>,
        store: Arc<dyn MediaStore>,
        options: TranscriptionOptions,
    ) -> Self {
        Self {
            engine,
            store,
            options,
        }
    }

    pub async fn transcribe(&self, artifacts: &[SegmentArtifact]) -> Vec<SegmentResult> {
        let mut results = Vec::with_capacity(artifacts.len());

        for artifact in artifacts {
            tracing::info!(
                ordinal = artifact.ordinal,
                filename = %artifact.filename,
                "Transcribing segment"
            );

            let outcome = match self.transcribe_one(artifact).await {
                Ok(response) => {
                    let outcome = classify(response);
                    if outcome == SegmentOutcome::Empty {
                        tracing::warn!(filename = %artifact.filename, "No transcription returned for segment");
                    }
                    outcome
                }
                Err(e) => {
                    tracing::error!(
                        ordinal = artifact.ordinal,
                        filename = %artifact.filename,
                        error = %e,
                        "Segment transcription failed"
                    );
                    SegmentOutcome::Failed(e.to_string())
                }
            };

            results.push(SegmentResult {
                ordinal: artifact.ordinal,
                filename: artifact.filename.clone(),
                outcome,
            });
        }

        results
    }

    async fn transcribe_one(
        &self,
        artifact: &SegmentArtifact,
    ) -> Result<TranscriptionResponse, SegmentTranscriptionError> {
        let audio = self.store.fetch(&artifact.location).await?;
        let mime = AudioFormat::from_filename(&artifact.filename)
            .map(|f| f.mime())
            .unwrap_or("application/octet-stream");

        let request = TranscriptionRequest {
            audio,
            filename: artifact.filename.clone(),
            mime,
            options: self.options.clone(),
        };

        Ok(self.engine.transcribe(request).await?)
    }
}

/// Timed segments win over flat text; a response with neither is `Empty`.
pub fn classify(response: TranscriptionResponse) -> SegmentOutcome {
    match response {
        TranscriptionResponse {
            segments: Some(segments),
            ..
        } if !segments.is_empty() => SegmentOutcome::Fragments(segments),
        TranscriptionResponse {
            text: Some(text), ..
        } if !text.trim().is_empty() => SegmentOutcome::PlainText(text),
        _ => SegmentOutcome::Empty,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SegmentTranscriptionError {
    #[error("reading segment: {0}")]
    Read(#[from] MediaStoreError),
    #[error("{0}")]
    Engine(#[from] TranscriptionError),
}
