use async_trait::async_trait;

use crate::application::ports::{
    TranscriptionEngine, TranscriptionError, TranscriptionRequest, TranscriptionResponse,
};

use super::verbose_json;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "whisper-large-v3-turbo";

/// Any OpenAI-compatible `/audio/transcriptions` endpoint (Groq, OpenAI, local gateways).
pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionResponse, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);
        let filename = request.filename.clone();
        let form = verbose_json::build_form(request, Some(&self.model))?;

        tracing::debug!(model = %self.model, filename = %filename, "Sending audio to Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        let result = verbose_json::read_response(response).await?;

        tracing::info!(
            filename = %filename,
            segments = result.segments.as_ref().map_or(0, Vec::len),
            chars = result.text.as_ref().map_or(0, String::len),
            "Whisper transcription completed"
        );

        Ok(result)
    }
}
