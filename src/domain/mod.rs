mod media_id;
mod partition_plan;
mod segment;
mod segment_result;
mod source_media;
mod storage_path;
mod transcript;

pub use media_id::{BatchId, MediaId};
pub use partition_plan::{MAX_SEGMENT_BYTES, PartitionPlan, PlanError, SegmentSpan};
pub use segment::{SegmentArtifact, segment_filename};
pub use segment_result::{Fragment, SegmentOutcome, SegmentResult};
pub use source_media::{AudioFormat, SUPPORTED_EXTENSIONS, SourceMedia, sanitize_filename};
pub use storage_path::{StorageArea, StoragePath};
pub use transcript::Transcript;
