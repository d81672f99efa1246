use async_trait::async_trait;

use crate::domain::Fragment;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionResponse, TranscriptionError>;
}

/// Decoding options sent with every segment.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionOptions {
    pub language: Option<String>,
    pub temperature: f32,
    pub segment_timestamps: bool,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            language: None,
            temperature: 0.0,
            segment_timestamps: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    pub audio: Vec<u8>,
    pub filename: String,
    pub mime: &'static str,
    pub options: TranscriptionOptions,
}

/// What a provider returned, before classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptionResponse {
    pub text: Option<String>,
    pub segments: Option<Vec<Fragment>>,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("engine configuration invalid: {0}")]
    Configuration(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
