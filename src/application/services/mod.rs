mod segment_extractor;
mod split_service;
mod storage_janitor;
mod transcribe_service;
mod transcription_dispatcher;

pub use segment_extractor::{ExtractionError, SegmentExtractor};
pub use split_service::{InputError, SplitError, SplitOutcome, SplitService};
pub use storage_janitor::{CleanupError, CleanupReport, StorageJanitor};
pub use transcribe_service::{
    TranscribeAllError, TranscribeScope, TranscribeService, TranscriptionRun,
};
pub use transcription_dispatcher::{
    SegmentTranscriptionError, TranscriptionDispatcher, classify,
};
