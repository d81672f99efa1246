use std::fs::File;
use std::path::Path;

use async_trait::async_trait;
use symphonia::core::codecs::CodecParameters;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::units::{Time, TimeBase};

use crate::application::ports::{DurationProbe, ProbeError};

/// Reads durations by demuxing the file with symphonia.
pub struct SymphoniaDurationProbe;

#[async_trait]
impl DurationProbe for SymphoniaDurationProbe {
    async fn probe(&self, path: &Path) -> Result<f64, ProbeError> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || probe_duration(&path))
            .await
            .map_err(|e| ProbeError::ToolFailed(format!("probe task: {}", e)))?
    }
}

pub fn probe_duration(path: &Path) -> Result<f64, ProbeError> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| ProbeError::Unrecognised(format!("probe: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| ProbeError::Unrecognised("no audio track found".to_string()))?;
    let track_id = track.id;
    let params = track.codec_params.clone();

    if let Some(duration) = duration_from_params(&params) {
        tracing::debug!(duration_secs = duration, "Duration read from container header");
        return Ok(duration);
    }

    // No frame count in the header (e.g. CBR mp3 without a Xing frame): walk the packets.
    let time_base = params
        .time_base
        .or_else(|| params.sample_rate.map(|rate| TimeBase::new(1, rate)))
        .ok_or_else(|| ProbeError::MissingDuration("no time base or sample rate".to_string()))?;

    let mut end_ts: u64 = 0;
    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(symphonia::core::errors::Error::ResetRequired) => break,
            Err(e) => {
                return Err(ProbeError::Unrecognised(format!("packet: {}", e)));
            }
        };

        if packet.track_id() == track_id {
            end_ts = end_ts.max(packet.ts() + packet.dur());
        }
    }

    if end_ts == 0 {
        return Err(ProbeError::MissingDuration(
            "no audio packets found".to_string(),
        ));
    }

    let duration = seconds(time_base.calc_time(end_ts));
    tracing::debug!(duration_secs = duration, "Duration computed from packets");
    Ok(duration)
}

fn duration_from_params(params: &CodecParameters) -> Option<f64> {
    let n_frames = params.n_frames?;
    let duration = match (params.time_base, params.sample_rate) {
        (Some(time_base), _) => seconds(time_base.calc_time(n_frames)),
        (None, Some(rate)) => n_frames as f64 / rate as f64,
        (None, None) => return None,
    };
    (duration > 0.0).then_some(duration)
}

fn seconds(time: Time) -> f64 {
    time.seconds as f64 + time.frac
}
