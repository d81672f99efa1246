use std::path::Path;
use std::process::Command;

use chunkscribe::application::ports::{AudioSlicer, SliceError};
use chunkscribe::domain::SegmentSpan;
use chunkscribe::infrastructure::audio::FfmpegSlicer;

fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn span(ordinal: usize, start_secs: f64, duration_secs: f64) -> SegmentSpan {
    SegmentSpan {
        ordinal,
        start_secs,
        duration_secs,
    }
}

fn generate_tone(path: &Path, seconds: u32) {
    let status = Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error", "-y", "-f", "lavfi", "-i"])
        .arg(format!("sine=frequency=440:duration={}", seconds))
        .arg(path)
        .status()
        .unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn given_missing_binary_when_slicing_then_returns_tool_missing() {
    let slicer = FfmpegSlicer::new("/nonexistent/ffmpeg-binary");
    let dir = tempfile::TempDir::new().unwrap();

    let result = slicer
        .slice(
            &dir.path().join("in.wav"),
            &span(1, 0.0, 1.0),
            &dir.path().join("out.mp3"),
        )
        .await;

    assert!(matches!(result, Err(SliceError::ToolMissing(_))));
}

#[tokio::test]
async fn given_wav_source_when_slicing_middle_range_then_writes_mp3_segment() {
    if !ffmpeg_available() {
        eprintln!("ffmpeg not installed, skipping");
        return;
    }
    let dir = tempfile::TempDir::new().unwrap();
    let source = dir.path().join("tone.wav");
    generate_tone(&source, 6);
    let output = dir.path().join("tone-part2.mp3");

    FfmpegSlicer::new("ffmpeg")
        .slice(&source, &span(2, 2.0, 2.0), &output)
        .await
        .unwrap();

    let written = std::fs::metadata(&output).unwrap();
    assert!(written.len() > 0);
}

#[tokio::test]
async fn given_corrupt_source_when_slicing_then_returns_tool_failed_with_stderr() {
    if !ffmpeg_available() {
        eprintln!("ffmpeg not installed, skipping");
        return;
    }
    let dir = tempfile::TempDir::new().unwrap();
    let source = dir.path().join("broken.mp3");
    std::fs::write(&source, b"definitely not mpeg audio").unwrap();

    let result = FfmpegSlicer::new("ffmpeg")
        .slice(&source, &span(1, 0.0, 1.0), &dir.path().join("out.mp3"))
        .await;

    assert!(matches!(result, Err(SliceError::ToolFailed { stderr, .. }) if !stderr.is_empty()));
}

#[test]
fn given_ffmpeg_slicer_when_asked_for_extension_then_returns_mp3() {
    assert_eq!(FfmpegSlicer::new("ffmpeg").output_extension(), "mp3");
}
