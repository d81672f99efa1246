use super::media_id::{BatchId, MediaId};
use super::storage_path::StoragePath;

/// Extensions the transcription side picks up from the segment area.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["mp3", "wav", "m4a", "mp4"];

const MAX_FILENAME_LEN: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3,
    Wav,
    M4a,
    Mp4,
}

impl AudioFormat {
    /// Case-insensitive lookup on the file extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "m4a" => Some(Self::M4a),
            "mp4" => Some(Self::Mp4),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::M4a => "m4a",
            Self::Mp4 => "mp4",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::M4a => "audio/mp4",
            Self::Mp4 => "video/mp4",
        }
    }
}

/// An uploaded audio file after size and duration have been probed.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMedia {
    pub id: MediaId,
    pub batch_id: BatchId,
    pub filename: String,
    pub location: StoragePath,
    pub size_bytes: u64,
    pub duration_secs: f64,
}

/// Reduces a client supplied filename to a single safe path component.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        return String::from("upload");
    }

    if cleaned.len() > MAX_FILENAME_LEN {
        // keep the extension when truncating
        match cleaned.rsplit_once('.') {
            Some((stem, ext)) if ext.len() < 10 => {
                let keep = MAX_FILENAME_LEN.saturating_sub(ext.len() + 1);
                format!("{}.{}", &stem[..keep.min(stem.len())], ext)
            }
            _ => cleaned[..MAX_FILENAME_LEN].to_string(),
        }
    } else {
        cleaned.to_string()
    }
}
