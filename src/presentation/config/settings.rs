use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::MAX_SEGMENT_BYTES;

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub segmentation: SegmentationSettings,
    pub media: MediaSettings,
    pub transcription: TranscriptionSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// `appsettings.{env}.toml` (optional), then `APP_*` variables,
    /// e.g. `APP_TRANSCRIPTION__API_KEY`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str().to_lowercase()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Base for segment links; derived from the request's Host header when unset.
    pub public_base_url: Option<String>,
    pub max_upload_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_base_url: None,
            max_upload_mb: 512,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub root: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            root: "data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SegmentationSettings {
    pub max_segment_bytes: u64,
}

impl Default for SegmentationSettings {
    fn default() -> Self {
        Self {
            max_segment_bytes: MAX_SEGMENT_BYTES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeBackend {
    Symphonia,
    Ffprobe,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub probe_backend: ProbeBackend,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            probe_backend: ProbeBackend::Symphonia,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProviderSetting {
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    /// Source-language hint; an empty string lets the provider detect it.
    pub language: Option<String>,
    pub temperature: f32,
    pub request_timeout_secs: u64,
    pub azure_deployment: Option<String>,
    pub azure_api_version: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            provider: TranscriptionProviderSetting::OpenAi,
            api_key: None,
            base_url: None,
            model: "whisper-large-v3-turbo".to_string(),
            language: Some("pt".to_string()),
            temperature: 0.0,
            request_timeout_secs: 300,
            azure_deployment: None,
            azure_api_version: "2024-06-01".to_string(),
        }
    }
}

impl TranscriptionSettings {
    /// Configured key, else `GROQ_API_KEY`, else `OPENAI_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("GROQ_API_KEY").ok())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}
