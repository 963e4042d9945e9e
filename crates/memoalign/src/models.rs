//! Records and result tallies produced by the pipeline.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::extract::RecordShape;

/// A video attachment recovered from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoRecord {
    /// Path as written in the document, e.g. `./video/2018-01/a.mp4`.
    pub relative_path: String,
    /// Message time in seconds since the Unix epoch, as the digit run
    /// written in the document. Kept unparsed so a value too large for the
    /// filesystem still counts as a found record.
    pub timestamp: String,
    /// Which serialization shape the record was matched in.
    pub shape: RecordShape,
}

impl VideoRecord {
    pub fn new(
        relative_path: impl Into<String>,
        timestamp: impl Into<String>,
        shape: RecordShape,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            timestamp: timestamp.into(),
            shape,
        }
    }

    /// Seconds since the epoch, or `None` if the value does not fit.
    pub fn unix_seconds(&self) -> Option<i64> {
        self.timestamp.parse().ok()
    }

    /// The timestamp in the local time zone, if representable.
    pub fn captured_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_opt(self.unix_seconds()?, 0).single()
    }
}

/// Tallies for one document.
///
/// Every recorded outcome is either a success or a failure, so
/// `success_count + failed_count == total_found` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingResult {
    total_found: usize,
    success_count: usize,
    failed_count: usize,
}

impl ProcessingResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one processed record.
    pub fn record(&mut self, success: bool) {
        self.total_found += 1;
        if success {
            self.success_count += 1;
        } else {
            self.failed_count += 1;
        }
    }

    pub fn total_found(&self) -> usize {
        self.total_found
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn failed_count(&self) -> usize {
        self.failed_count
    }

    pub fn all_succeeded(&self) -> bool {
        self.success_count == self.total_found
    }
}

/// Aggregate tallies for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchResult {
    /// Documents returned by discovery.
    pub scanned_files: usize,
    /// Documents that yielded at least one record.
    pub processed_files: usize,
    pub total_videos_found: usize,
    pub total_videos_success: usize,
    pub total_videos_failed: usize,
    /// Documents that were missing or could not be processed.
    pub failed_html_files: Vec<String>,
    /// Documents that were read but contained no video records.
    pub empty_html_files: Vec<String>,
}

impl BatchResult {
    /// Fold in the result of one document.
    ///
    /// Documents without records are tracked separately and do not count
    /// as processed.
    pub fn add_document(&mut self, name: impl Into<String>, result: &ProcessingResult) {
        if result.total_found() == 0 {
            self.empty_html_files.push(name.into());
            return;
        }
        self.processed_files += 1;
        self.total_videos_found += result.total_found();
        self.total_videos_success += result.success_count();
        self.total_videos_failed += result.failed_count();
    }

    /// Record a document that produced no result.
    pub fn add_failure(&mut self, name: impl Into<String>) {
        self.failed_html_files.push(name.into());
    }

    /// Percentage of found videos that were updated, if any were found.
    pub fn success_rate(&self) -> Option<f64> {
        if self.total_videos_found == 0 {
            return None;
        }
        Some(self.total_videos_success as f64 / self.total_videos_found as f64 * 100.0)
    }

    pub fn all_succeeded(&self) -> bool {
        self.total_videos_found > 0 && self.total_videos_success == self.total_videos_found
    }
}
