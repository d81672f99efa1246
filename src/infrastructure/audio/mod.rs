mod azure_whisper_engine;
mod ffmpeg_slicer;
pub mod ffprobe_probe;
mod mock_transcription_engine;
mod openai_whisper_engine;
mod probe_factory;
pub mod symphonia_probe;
mod transcription_engine_factory;
pub mod verbose_json;

pub use azure_whisper_engine::AzureWhisperEngine;
pub use ffmpeg_slicer::FfmpegSlicer;
pub use ffprobe_probe::FfprobeDurationProbe;
pub use mock_transcription_engine::{MockReply, MockTranscriptionEngine};
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use probe_factory::DurationProbeFactory;
pub use symphonia_probe::SymphoniaDurationProbe;
pub use transcription_engine_factory::TranscriptionEngineFactory;

const STDERR_TAIL_BYTES: usize = 512;

/// Last few hundred bytes of a tool's stderr, for error messages.
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    let start = text
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| text.len() - i <= STDERR_TAIL_BYTES)
        .unwrap_or(text.len());
    text[start..].to_string()
}
