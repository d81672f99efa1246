use chunkscribe::infrastructure::observability::TracingConfig;
use chunkscribe::presentation::config::{Environment, LoggingSettings};

#[test]
fn given_default_config_when_created_then_environment_is_set() {
    let config = TracingConfig::default();
    assert!(!config.environment.is_empty());
    assert!(config.default_filter.contains("chunkscribe=debug"));
}

#[test]
fn given_logging_level_when_building_from_settings_then_filter_uses_it() {
    let settings = LoggingSettings {
        level: "warn".to_string(),
        enable_json: false,
    };

    let config = TracingConfig::from_settings(&settings, Environment::Prod);

    assert_eq!(config.environment, "Prod");
    assert_eq!(
        config.default_filter,
        "warn,chunkscribe=warn,tower_http=warn"
    );
}

#[test]
fn given_json_enabled_in_settings_when_building_then_json_format_is_on() {
    let settings = LoggingSettings {
        level: String::new(),
        enable_json: true,
    };

    let config = TracingConfig::from_settings(&settings, Environment::Local);

    assert!(config.json_format);
    assert_eq!(config.default_filter, TracingConfig::default().default_filter);
}
