mod audio_slicer;
mod duration_probe;
mod media_store;
mod transcription_engine;

pub use audio_slicer::{AudioSlicer, SliceError};
pub use duration_probe::{DurationProbe, ProbeError};
pub use media_store::{MediaStore, MediaStoreError};
pub use transcription_engine::{
    TranscriptionEngine, TranscriptionError, TranscriptionOptions, TranscriptionRequest,
    TranscriptionResponse,
};
