use std::path::Path;

use async_trait::async_trait;

/// Reads the playback duration of a media file.
#[async_trait]
pub trait DurationProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<f64, ProbeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("unrecognised media: {0}")]
    Unrecognised(String),
    #[error("no duration in media metadata: {0}")]
    MissingDuration(String),
    #[error("probe tool failed: {0}")]
    ToolFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
