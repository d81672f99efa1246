use std::fmt;

use super::media_id::BatchId;

/// Top-level areas of the media store. Each area is split per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageArea {
    Uploads,
    Staging,
    Chunks,
}

impl StorageArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageArea::Uploads => "uploads",
            StorageArea::Staging => "staging",
            StorageArea::Chunks => "chunks",
        }
    }

    /// Prefix holding every file of `batch` in this area.
    pub fn batch_prefix(&self, batch: &BatchId) -> StoragePath {
        StoragePath(format!("{}/{}", self.as_str(), batch))
    }

    pub fn root(&self) -> StoragePath {
        StoragePath(self.as_str().to_string())
    }
}

/// Slash separated location relative to the media store root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn new(area: StorageArea, batch: &BatchId, filename: &str) -> Self {
        Self(format!("{}/{}/{}", area.as_str(), batch, filename))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Path with the leading area segment removed, e.g. `{batch}/{file}`.
    pub fn relative_to_area(&self) -> &str {
        self.0.split_once('/').map(|(_, rest)| rest).unwrap_or(&self.0)
    }

    /// Batch namespace encoded in the second path segment, if any.
    pub fn batch_id(&self) -> Option<BatchId> {
        self.0.split('/').nth(1).and_then(BatchId::parse)
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
