use std::sync::Arc;

use crate::application::ports::MediaStore;
use crate::domain::{BatchId, StorageArea, StoragePath};

const CLEANED_AREAS: [StorageArea; 3] = [
    StorageArea::Uploads,
    StorageArea::Staging,
    StorageArea::Chunks,
];

/// Removes every stored file of the given batches, best-effort.
#[derive(Clone)]
pub struct StorageJanitor {
    store: Arc<dyn MediaStore>,
}

#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: usize,
    pub failures: Vec<CleanupError>,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to remove {path}: {reason}")]
pub struct CleanupError {
    pub path: String,
    pub reason: String,
}

impl StorageJanitor {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self { store }
    }

    pub async fn cleanup(&self, batches: &[BatchId]) -> CleanupReport {
        let mut report = CleanupReport::default();

        for batch in batches {
            for area in CLEANED_AREAS {
                self.clear_prefix(&area.batch_prefix(batch), &mut report)
                    .await;
            }
        }

        if report.failures.is_empty() {
            tracing::info!(
                batches = batches.len(),
                removed = report.removed,
                "Storage cleaned"
            );
        } else {
            tracing::warn!(
                batches = batches.len(),
                removed = report.removed,
                failed = report.failures.len(),
                "Storage cleanup left files behind"
            );
        }

        report
    }

    async fn clear_prefix(&self, prefix: &StoragePath, report: &mut CleanupReport) {
        let files = match self.store.list(prefix).await {
            Ok(files) => files,
            Err(e) => {
                tracing::error!(prefix = %prefix, error = %e, "Failed to list files for cleanup");
                report.failures.push(CleanupError {
                    path: prefix.to_string(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        for file in files {
            match self.store.delete(&file).await {
                Ok(()) => report.removed += 1,
                Err(e) => {
                    tracing::error!(path = %file, error = %e, "Failed to remove file");
                    report.failures.push(CleanupError {
                        path: file.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if let Err(e) = self.store.remove_empty_dir(prefix).await {
            tracing::debug!(prefix = %prefix, error = %e, "Directory left in place");
        }
    }
}
