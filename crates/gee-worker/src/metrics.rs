//! Retrieval metrics.
//!
//! Only the `metrics` facade is used; no exporter is installed here, so
//! these are no-ops unless the embedding process installs a recorder.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const RETRIEVALS_TOTAL: &str = "gee_retrievals_total";
    pub const REGIONS_EXTRACTED_TOTAL: &str = "gee_regions_extracted_total";
    pub const REGIONS_SKIPPED_TOTAL: &str = "gee_regions_skipped_total";
    pub const RETRIEVAL_DURATION_SECONDS: &str = "gee_retrieval_duration_seconds";
}

/// Why a detected region did not make it into the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    OutOfBounds,
    Encode,
    Storage,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::OutOfBounds => "out_of_bounds",
            SkipReason::Encode => "encode",
            SkipReason::Storage => "storage",
        }
    }
}

/// Record a finished retrieval.
pub fn record_retrieval(outcome: &'static str, duration_secs: f64) {
    let labels = [("outcome", outcome)];
    counter!(names::RETRIEVALS_TOTAL, &labels).increment(1);
    histogram!(names::RETRIEVAL_DURATION_SECONDS, &labels).record(duration_secs);
}

pub fn record_regions_extracted(count: usize) {
    counter!(names::REGIONS_EXTRACTED_TOTAL).increment(count as u64);
}

pub fn record_region_skipped(reason: SkipReason) {
    counter!(names::REGIONS_SKIPPED_TOTAL, "reason" => reason.as_str()).increment(1);
}
