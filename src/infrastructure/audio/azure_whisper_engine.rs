use async_trait::async_trait;

use crate::application::ports::{
    TranscriptionEngine, TranscriptionError, TranscriptionRequest, TranscriptionResponse,
};

use super::verbose_json;

pub struct AzureWhisperEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl AzureWhisperEngine {
    pub fn new(base_url: &str, deployment: &str, api_key: &str, api_version: &str) -> Self {
        let endpoint = format!(
            "{}/openai/deployments/{}/audio/transcriptions?api-version={}",
            base_url.trim_end_matches('/'),
            deployment,
            api_version,
        );
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: api_key.to_string(),
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl TranscriptionEngine for AzureWhisperEngine {
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionResponse, TranscriptionError> {
        let filename = request.filename.clone();
        // the deployment name selects the model
        let form = verbose_json::build_form(request, None)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            filename = %filename,
            "Sending audio to Azure OpenAI Whisper"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        let result = verbose_json::read_response(response).await?;

        tracing::info!(
            filename = %filename,
            segments = result.segments.as_ref().map_or(0, Vec::len),
            "Azure OpenAI Whisper transcription completed"
        );

        Ok(result)
    }
}
