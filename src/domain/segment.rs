use super::media_id::MediaId;
use super::storage_path::StoragePath;

/// One extracted slice of the source audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentArtifact {
    pub ordinal: usize,
    pub filename: String,
    pub location: StoragePath,
}

/// `{media}-part{ordinal}.{ext}`, with the ordinal zero-padded to `width`.
pub fn segment_filename(media_id: &MediaId, ordinal: usize, width: usize, extension: &str) -> String {
    format!(
        "{}-part{:0width$}.{}",
        media_id,
        ordinal,
        extension,
        width = width
    )
}
