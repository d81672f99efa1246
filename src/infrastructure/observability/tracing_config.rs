use crate::presentation::config::{Environment, LoggingSettings};

const DEFAULT_FILTER: &str = "info,chunkscribe=debug,tower_http=debug";

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Fallback filter directives when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl TracingConfig {
    pub fn from_settings(settings: &LoggingSettings, environment: Environment) -> Self {
        let defaults = Self::default();
        let default_filter = if settings.level.is_empty() {
            defaults.default_filter
        } else {
            format!(
                "{level},chunkscribe={level},tower_http={level}",
                level = settings.level
            )
        };

        Self {
            environment: environment.to_string(),
            json_format: defaults.json_format || settings.enable_json,
            default_filter,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}
