use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{MediaStore, MediaStoreError};
use crate::domain::StoragePath;

/// Media store rooted at a local directory.
pub struct LocalMediaStore {
    inner: Arc<LocalFileSystem>,
    root: PathBuf,
}

impl LocalMediaStore {
    pub fn new(base_path: PathBuf) -> Result<Self, MediaStoreError> {
        std::fs::create_dir_all(&base_path).map_err(MediaStoreError::Io)?;
        let root = base_path.canonicalize().map_err(MediaStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&root)
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            root,
        })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait::async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(
        &self,
        path: &StoragePath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, MediaStoreError> {
        let store_path = StorePath::from(path.as_str());
        let mut upload = self
            .inner
            .put_multipart(&store_path)
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

        let mut total_bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(MediaStoreError::SourceRead(e.to_string()));
                }
            };
            total_bytes += bytes.len() as u64;
            if let Err(e) = upload.put_part(PutPayload::from(bytes)).await {
                let _ = upload.abort().await;
                return Err(MediaStoreError::UploadFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

        tracing::debug!(path = %path, bytes = total_bytes, "Upload stored");

        Ok(total_bytes)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, MediaStoreError> {
        let store_path = StorePath::from(path.as_str());
        let result = self
            .inner
            .get(&store_path)
            .await
            .map_err(|e| MediaStoreError::NotFound(e.to_string()))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| MediaStoreError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn head(&self, path: &StoragePath) -> Result<u64, MediaStoreError> {
        let store_path = StorePath::from(path.as_str());
        let meta = self
            .inner
            .head(&store_path)
            .await
            .map_err(|e| MediaStoreError::NotFound(e.to_string()))?;
        Ok(meta.size as u64)
    }

    async fn list(&self, prefix: &StoragePath) -> Result<Vec<StoragePath>, MediaStoreError> {
        if !tokio::fs::try_exists(self.local_path(prefix)).await? {
            return Ok(Vec::new());
        }

        let store_prefix = StorePath::from(prefix.as_str());
        let objects: Vec<_> = self
            .inner
            .list(Some(&store_prefix))
            .try_collect()
            .await
            .map_err(|e| MediaStoreError::ListFailed(e.to_string()))?;

        Ok(objects
            .into_iter()
            .map(|meta| StoragePath::from_raw(meta.location.to_string()))
            .collect())
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), MediaStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| MediaStoreError::DeleteFailed(e.to_string()))
    }

    async fn ensure_dir(&self, prefix: &StoragePath) -> Result<(), MediaStoreError> {
        tokio::fs::create_dir_all(self.local_path(prefix)).await?;
        Ok(())
    }

    async fn rename_dir(
        &self,
        from: &StoragePath,
        to: &StoragePath,
    ) -> Result<(), MediaStoreError> {
        let target = self.local_path(to);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::rename(self.local_path(from), target).await?;
        Ok(())
    }

    async fn remove_empty_dir(&self, prefix: &StoragePath) -> Result<(), MediaStoreError> {
        match tokio::fs::remove_dir(self.local_path(prefix)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MediaStoreError::Io(e)),
        }
    }

    fn local_path(&self, path: &StoragePath) -> PathBuf {
        path.as_str()
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }
}
