use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{
    TranscriptionEngine, TranscriptionError, TranscriptionRequest, TranscriptionResponse,
};
use crate::domain::Fragment;

/// Canned answer for segments whose filename contains a given marker.
#[derive(Debug, Clone)]
pub enum MockReply {
    Fragments(Vec<String>),
    Text(String),
    Empty,
    Fail(String),
}

/// Offline engine. Unmatched segments get a one-fragment echo of their size.
#[derive(Default)]
pub struct MockTranscriptionEngine {
    replies: Vec<(String, MockReply)>,
    calls: Mutex<Vec<String>>,
}

impl MockTranscriptionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(mut self, filename_marker: impl Into<String>, reply: MockReply) -> Self {
        self.replies.push((filename_marker.into(), reply));
        self
    }

    /// Filenames in the order they were submitted.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(
        &self,
        request: TranscriptionRequest,
    ) -> Result<TranscriptionResponse, TranscriptionError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.filename.clone());
        }

        let reply = self
            .replies
            .iter()
            .find(|(marker, _)| request.filename.contains(marker.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(MockReply::Fragments(texts)) => Ok(TranscriptionResponse {
                text: Some(texts.join(" ")),
                segments: Some(
                    texts
                        .into_iter()
                        .enumerate()
                        .map(|(i, text)| Fragment {
                            text,
                            start_secs: i as f64,
                            end_secs: i as f64 + 1.0,
                        })
                        .collect(),
                ),
            }),
            Some(MockReply::Text(text)) => Ok(TranscriptionResponse {
                text: Some(text),
                segments: None,
            }),
            Some(MockReply::Empty) => Ok(TranscriptionResponse::default()),
            Some(MockReply::Fail(reason)) => Err(TranscriptionError::ApiRequestFailed(reason)),
            None => {
                let text = format!("[{} bytes from {}]", request.audio.len(), request.filename);
                Ok(TranscriptionResponse {
                    text: Some(text.clone()),
                    segments: Some(vec![Fragment {
                        text,
                        start_secs: 0.0,
                        end_secs: 0.0,
                    }]),
                })
            }
        }
    }
}
