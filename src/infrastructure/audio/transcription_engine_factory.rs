use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::presentation::config::{TranscriptionProviderSetting, TranscriptionSettings};

use super::azure_whisper_engine::AzureWhisperEngine;
use super::mock_transcription_engine::MockTranscriptionEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        settings: &TranscriptionSettings,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| TranscriptionError::Configuration(format!("http client: {}", e)))?;

        match settings.provider {
            TranscriptionProviderSetting::OpenAi => {
                let key = settings.resolve_api_key().ok_or_else(|| {
                    TranscriptionError::Configuration(
                        "API key required for the Whisper API".to_string(),
                    )
                })?;
                let engine = OpenAiWhisperEngine::new(
                    key,
                    settings.base_url.clone(),
                    Some(settings.model.clone()),
                )
                .with_client(client);
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::Azure => {
                let base_url = settings.base_url.as_deref().ok_or_else(|| {
                    TranscriptionError::Configuration("base_url required for Azure".to_string())
                })?;
                let deployment = settings.azure_deployment.as_deref().ok_or_else(|| {
                    TranscriptionError::Configuration(
                        "azure_deployment required for Azure".to_string(),
                    )
                })?;
                let key = settings.resolve_api_key().ok_or_else(|| {
                    TranscriptionError::Configuration("API key required for Azure".to_string())
                })?;
                let engine =
                    AzureWhisperEngine::new(base_url, deployment, &key, &settings.azure_api_version)
                        .with_client(client);
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::Mock => {
                tracing::warn!("Using mock transcription engine");
                Ok(Arc::new(MockTranscriptionEngine::new()))
            }
        }
    }
}
