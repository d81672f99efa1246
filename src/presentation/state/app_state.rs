use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::{SplitService, TranscribeService};

#[derive(Clone)]
pub struct AppState {
    pub split_service: Arc<SplitService>,
    pub transcribe_service: Arc<TranscribeService>,
    /// Directory served under `/chunks`.
    pub segments_dir: PathBuf,
    pub public_base_url: Option<String>,
    pub max_upload_bytes: usize,
}
