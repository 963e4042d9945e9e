//! Progress hooks for the pipeline.
//!
//! The library does not print. Callers that want per-record or
//! per-document output implement [`Reporter`]; every method has a no-op
//! default so implementations only override what they show.

use std::path::{Path, PathBuf};

use crate::apply::ApplyOutcome;
use crate::error::AlignError;
use crate::models::{ProcessingResult, VideoRecord};

#[allow(unused_variables)]
pub trait Reporter {
    /// Documents discovered for a batch, in processing order.
    fn batch_started(&mut self, documents: &[PathBuf]) {}

    /// A document is about to be read.
    fn document_started(&mut self, path: &Path) {}

    /// The document does not exist.
    fn document_missing(&mut self, path: &Path) {}

    /// Extraction finished with `count` records.
    fn records_found(&mut self, path: &Path, count: usize) {}

    /// One record was resolved to `target` and applied.
    fn record_processed(&mut self, record: &VideoRecord, target: &Path, outcome: &ApplyOutcome) {}

    /// All records of a document were processed.
    fn document_finished(&mut self, path: &Path, result: &ProcessingResult) {}

    /// Processing a document in a batch raised an error.
    fn document_failed(&mut self, path: &Path, error: &AlignError) {}
}

/// Reporter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {}
