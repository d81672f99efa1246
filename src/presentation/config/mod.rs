mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    LoggingSettings, MediaSettings, ProbeBackend, SegmentationSettings, ServerSettings, Settings,
    StorageSettings, TranscriptionProviderSetting, TranscriptionSettings,
};
