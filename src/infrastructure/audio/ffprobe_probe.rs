use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{DurationProbe, ProbeError};

use super::stderr_tail;

/// Reads the container duration through the `ffprobe` binary.
pub struct FfprobeDurationProbe {
    binary: String,
}

impl FfprobeDurationProbe {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl DurationProbe for FfprobeDurationProbe {
    async fn probe(&self, path: &Path) -> Result<f64, ProbeError> {
        let output = Command::new(&self.binary)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ProbeError::ToolFailed(format!("{}: {}", self.binary, e)))?;

        if !output.status.success() {
            return Err(ProbeError::Unrecognised(stderr_tail(&output.stderr)));
        }

        parse_duration(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parses ffprobe's bare `format=duration` value.
pub fn parse_duration(stdout: &str) -> Result<f64, ProbeError> {
    let raw = stdout.trim();
    raw.parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .ok_or_else(|| ProbeError::MissingDuration(format!("ffprobe reported {:?}", raw)))
}
