mod health;
pub mod responses;
mod split_audio;
mod transcribe_all;

pub use health::{HealthResponse, health_handler};
pub use responses::{ErrorResponse, SplitResponse, TranscribeResponse};
pub use split_audio::{split_audio_handler, split_error_status, split_response};
pub use transcribe_all::{transcribe_all_handler, transcribe_batch_handler};
