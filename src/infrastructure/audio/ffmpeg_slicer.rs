use std::io;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioSlicer, SliceError};
use crate::domain::SegmentSpan;

use super::stderr_tail;

/// Re-encodes a time range of the source to mp3 with the `ffmpeg` binary.
pub struct FfmpegSlicer {
    binary: String,
}

impl FfmpegSlicer {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn command(&self, source: &Path, span: &SegmentSpan, output: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["-hide_banner", "-loglevel", "error", "-y"])
            .arg("-ss")
            .arg(format!("{:.3}", span.start_secs))
            .arg("-t")
            .arg(format!("{:.3}", span.duration_secs))
            .arg("-i")
            .arg(source)
            .args(["-vn", "-acodec", "libmp3lame", "-f", "mp3"])
            .arg(output)
            .stdin(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl AudioSlicer for FfmpegSlicer {
    async fn slice(
        &self,
        source: &Path,
        span: &SegmentSpan,
        output: &Path,
    ) -> Result<(), SliceError> {
        let result = self
            .command(source, span, output)
            .output()
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => SliceError::ToolMissing(self.binary.clone()),
                _ => SliceError::Io(e),
            })?;

        if !result.status.success() {
            return Err(SliceError::ToolFailed {
                status: result.status.to_string(),
                stderr: stderr_tail(&result.stderr),
            });
        }

        Ok(())
    }

    fn output_extension(&self) -> &'static str {
        "mp3"
    }
}
