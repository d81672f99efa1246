use std::io;
use std::path::PathBuf;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::StoragePath;

/// Durable storage for uploads and extracted segments.
///
/// Paths are relative to the store root. The media engine works on plain
/// files, so the store also exposes the local path behind a location.
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    /// Writes `stream` to `path` and returns the byte count. An error yielded
    /// by the stream itself is reported as `SourceRead`.
    async fn store(
        &self,
        path: &StoragePath,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, MediaStoreError>;

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, MediaStoreError>;

    async fn head(&self, path: &StoragePath) -> Result<u64, MediaStoreError>;

    /// Every file below `prefix`, in no particular order. A missing prefix is empty.
    async fn list(&self, prefix: &StoragePath) -> Result<Vec<StoragePath>, MediaStoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), MediaStoreError>;

    /// Creates the directory backing `prefix` so external tools can write into it.
    async fn ensure_dir(&self, prefix: &StoragePath) -> Result<(), MediaStoreError>;

    /// Moves a whole directory in one step. `to` must not exist yet.
    async fn rename_dir(&self, from: &StoragePath, to: &StoragePath)
    -> Result<(), MediaStoreError>;

    /// Removes the directory backing `prefix` if it is empty. Missing is fine.
    async fn remove_empty_dir(&self, prefix: &StoragePath) -> Result<(), MediaStoreError>;

    fn local_path(&self, path: &StoragePath) -> PathBuf;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("reading source stream failed: {0}")]
    SourceRead(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("list failed: {0}")]
    ListFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
