/// Default upper bound on the projected size of one segment (10 MiB).
pub const MAX_SEGMENT_BYTES: u64 = 10 * 1024 * 1024;

/// One time range of the source, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSpan {
    /// 1-based position in the plan.
    pub ordinal: usize,
    pub start_secs: f64,
    pub duration_secs: f64,
}

impl SegmentSpan {
    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.duration_secs
    }
}

/// Time-proportional split of a source into roughly equal-size segments.
///
/// The split is by duration, not by bytes: with variable bitrate audio a
/// single segment may still end up larger than the configured maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionPlan {
    spans: Vec<SegmentSpan>,
    total_duration_secs: f64,
}

impl PartitionPlan {
    pub fn compute(
        byte_size: u64,
        duration_secs: f64,
        max_segment_bytes: u64,
    ) -> Result<Self, PlanError> {
        if max_segment_bytes == 0 {
            return Err(PlanError::InvalidPolicy);
        }
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(PlanError::InvalidDuration(duration_secs));
        }

        let count = if byte_size <= max_segment_bytes {
            1
        } else {
            byte_size.div_ceil(max_segment_bytes) as usize
        };

        let segment_duration = duration_secs / count as f64;
        let spans = (0..count)
            .map(|i| SegmentSpan {
                ordinal: i + 1,
                start_secs: i as f64 * segment_duration,
                duration_secs: segment_duration,
            })
            .collect();

        Ok(Self {
            spans,
            total_duration_secs: duration_secs,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.spans.len()
    }

    pub fn spans(&self) -> &[SegmentSpan] {
        &self.spans
    }

    pub fn total_duration_secs(&self) -> f64 {
        self.total_duration_secs
    }

    /// Width ordinals are zero-padded to, so lexicographic filename order
    /// equals plan order.
    pub fn ordinal_width(&self) -> usize {
        self.segment_count().to_string().len()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    #[error("source duration is not usable for planning: {0}")]
    InvalidDuration(f64),
    #[error("maximum segment size must be greater than zero")]
    InvalidPolicy,
}
