use std::sync::Arc;

use crate::application::ports::DurationProbe;
use crate::presentation::config::{MediaSettings, ProbeBackend};

use super::ffprobe_probe::FfprobeDurationProbe;
use super::symphonia_probe::SymphoniaDurationProbe;

pub struct DurationProbeFactory;

impl DurationProbeFactory {
    pub fn create(settings: &MediaSettings) -> Arc<dyn DurationProbe> {
        match settings.probe_backend {
            ProbeBackend::Symphonia => Arc::new(SymphoniaDurationProbe),
            ProbeBackend::Ffprobe => Arc::new(FfprobeDurationProbe::new(&settings.ffprobe_path)),
        }
    }
}
