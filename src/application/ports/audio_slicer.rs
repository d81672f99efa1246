use std::path::Path;

use async_trait::async_trait;

use crate::domain::SegmentSpan;

/// Media engine that copies one time range of a source into its own file.
#[async_trait]
pub trait AudioSlicer: Send + Sync {
    async fn slice(&self, source: &Path, span: &SegmentSpan, output: &Path)
    -> Result<(), SliceError>;

    /// Extension of the files this slicer writes.
    fn output_extension(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum SliceError {
    #[error("media tool not found: {0}")]
    ToolMissing(String),
    #[error("media tool exited with {status}: {stderr}")]
    ToolFailed { status: String, stderr: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
