/// One timed unit of transcribed text.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub start_secs: f64,
    pub end_secs: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SegmentOutcome {
    Fragments(Vec<Fragment>),
    PlainText(String),
    /// The provider answered but returned neither segments nor text.
    Empty,
    Failed(String),
}

/// Transcription outcome for one segment, tagged with its ordinal.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentResult {
    pub ordinal: usize,
    pub filename: String,
    pub outcome: SegmentOutcome,
}

impl SegmentResult {
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, SegmentOutcome::Failed(_))
    }

    /// Raw text pieces in their given order; nothing for failed or empty results.
    pub fn pieces(&self) -> Vec<&str> {
        match &self.outcome {
            SegmentOutcome::Fragments(fragments) => {
                fragments.iter().map(|f| f.text.as_str()).collect()
            }
            SegmentOutcome::PlainText(text) => vec![text.as_str()],
            SegmentOutcome::Empty | SegmentOutcome::Failed(_) => Vec::new(),
        }
    }
}
