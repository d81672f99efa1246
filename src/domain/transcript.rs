use super::segment_result::SegmentResult;

/// Final joined text for a set of transcribed segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub total_parts: usize,
    pub failed_parts: Vec<String>,
}

impl Transcript {
    /// Joins the trimmed, non-empty pieces of every result with one space.
    /// Results are taken in the order given; callers pass them in ordinal order.
    pub fn assemble(results: &[SegmentResult]) -> Self {
        let text = results
            .iter()
            .flat_map(|r| r.pieces())
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let failed_parts = results
            .iter()
            .filter(|r| r.is_failed())
            .map(|r| r.filename.clone())
            .collect();

        Self {
            text,
            total_parts: results.len(),
            failed_parts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
