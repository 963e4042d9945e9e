//! Single-document processing: load, extract, resolve, apply.

use std::path::Path;

use crate::apply::{apply_timestamp, resolve_target};
use crate::config::AlignConfig;
use crate::error::Result;
use crate::extract::{dedupe_records, RecordExtractor};
use crate::loader::read_document;
use crate::models::ProcessingResult;
use crate::report::Reporter;

/// Runs the pipeline over one document at a time.
pub struct DocumentProcessor {
    config: AlignConfig,
    extractor: RecordExtractor,
}

impl DocumentProcessor {
    pub fn new(config: AlignConfig) -> Self {
        Self {
            config,
            extractor: RecordExtractor::new(),
        }
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Process one document.
    ///
    /// Returns `Ok(None)` if the document does not exist. A document without
    /// video records yields a result with `total_found == 0`. Individual
    /// records never abort processing; only failing to read the document
    /// itself is an error.
    pub fn process(
        &self,
        document: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<Option<ProcessingResult>> {
        if !document.exists() {
            tracing::warn!("Document not found: {}", document.display());
            reporter.document_missing(document);
            return Ok(None);
        }

        reporter.document_started(document);
        let base_dir = self.config.base_dir_for(document);

        let records = {
            let decoded = read_document(document)?;
            self.extractor.extract(&decoded.text)
        };
        let records = if self.config.dedupe {
            dedupe_records(records)
        } else {
            records
        };

        reporter.records_found(document, records.len());

        let mut result = ProcessingResult::new();
        if records.is_empty() {
            tracing::info!("No video records in {}", document.display());
            return Ok(Some(result));
        }

        for record in &records {
            let target = resolve_target(&base_dir, &record.relative_path);
            let outcome = apply_timestamp(&target, &record.timestamp, self.config.dry_run);
            tracing::debug!(
                "{} -> {} ({:?})",
                record.relative_path,
                target.display(),
                outcome
            );
            result.record(outcome.is_success());
            reporter.record_processed(record, &target, &outcome);
        }

        tracing::info!(
            "{}: {}/{} videos updated",
            document.display(),
            result.success_count(),
            result.total_found()
        );
        reporter.document_finished(document, &result);

        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::ApplyOutcome;
    use crate::models::VideoRecord;
    use crate::report::NoopReporter;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[derive(Default)]
    struct Recording {
        outcomes: Vec<(String, PathBuf, ApplyOutcome)>,
        missing: usize,
        found: Option<usize>,
    }

    impl Reporter for Recording {
        fn document_missing(&mut self, _path: &Path) {
            self.missing += 1;
        }

        fn records_found(&mut self, _path: &Path, count: usize) {
            self.found = Some(count);
        }

        fn record_processed(&mut self, record: &VideoRecord, target: &Path, outcome: &ApplyOutcome) {
            self.outcomes.push((
                record.relative_path.clone(),
                target.to_path_buf(),
                outcome.clone(),
            ));
        }
    }

    #[test]
    fn test_missing_document_yields_no_result() {
        let dir = tempdir().unwrap();
        let processor = DocumentProcessor::new(AlignConfig::new());
        let mut reporter = Recording::default();

        let result = processor
            .process(&dir.path().join("missing.html"), &mut reporter)
            .unwrap();
        assert!(result.is_none());
        assert_eq!(reporter.missing, 1);
    }

    #[test]
    fn test_document_without_records_yields_empty_result() {
        let dir = tempdir().unwrap();
        let doc = dir.path().join("chat.html");
        std::fs::write(&doc, "<html><body>no videos</body></html>").unwrap();

        let processor = DocumentProcessor::new(AlignConfig::new());
        let result = processor.process(&doc, &mut NoopReporter).unwrap().unwrap();
        assert_eq!(result.total_found(), 0);
        assert_eq!(result.success_count(), 0);
        assert_eq!(result.failed_count(), 0);
    }

    #[test]
    fn test_targets_resolve_against_document_directory() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("video")).unwrap();
        std::fs::write(dir.path().join("video/a.mp4"), b"x").unwrap();
        let doc = dir.path().join("chat.html");
        std::fs::write(
            &doc,
            "{ type:43, text:'./video/a.mp4', timestamp:1514809949 }\n\
             { type:43, text:'./video/b.mp4', timestamp:1514809950 }",
        )
        .unwrap();

        let processor = DocumentProcessor::new(AlignConfig::new());
        let mut reporter = Recording::default();
        let result = processor.process(&doc, &mut reporter).unwrap().unwrap();

        assert_eq!(result.total_found(), 2);
        assert_eq!(result.success_count(), 1);
        assert_eq!(result.failed_count(), 1);
        assert_eq!(reporter.found, Some(2));
        assert_eq!(reporter.outcomes[0].1, dir.path().join("video/a.mp4"));
        assert_eq!(reporter.outcomes[0].2, ApplyOutcome::Applied);
        assert_eq!(reporter.outcomes[1].2, ApplyOutcome::NotFound);
    }

    #[test]
    fn test_dedupe_collapses_repeated_pairs() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp4"), b"x").unwrap();
        let doc = dir.path().join("chat.html");
        std::fs::write(
            &doc,
            "{ type:43, text:'./a.mp4', timestamp:5 } { type:43, text:'a.mp4', timestamp:5 }\
             { type:43, text:'./a.mp4', timestamp:5 }",
        )
        .unwrap();

        let plain = DocumentProcessor::new(AlignConfig::new());
        let result = plain.process(&doc, &mut NoopReporter).unwrap().unwrap();
        assert_eq!(result.total_found(), 3);

        let deduped = DocumentProcessor::new(AlignConfig::new().with_dedupe(true));
        let result = deduped.process(&doc, &mut NoopReporter).unwrap().unwrap();
        // Paths are compared as written, so "a.mp4" and "./a.mp4" stay distinct.
        assert_eq!(result.total_found(), 2);
        assert!(result.all_succeeded());
    }

    #[test]
    fn test_out_of_range_timestamp_counts_as_failure() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp4"), b"x").unwrap();
        std::fs::write(dir.path().join("b.mp4"), b"x").unwrap();
        let doc = dir.path().join("chat.html");
        std::fs::write(
            &doc,
            "{ type:43, text:'./a.mp4', timestamp:99999999999999999999999 }\n\
             { type:43, text:'./b.mp4', timestamp:1514809949 }",
        )
        .unwrap();

        let processor = DocumentProcessor::new(AlignConfig::new());
        let mut reporter = Recording::default();
        let result = processor.process(&doc, &mut reporter).unwrap().unwrap();

        assert_eq!(result.total_found(), 2);
        assert_eq!(result.failed_count(), 1);
        assert_eq!(result.success_count(), 1);
        assert!(matches!(reporter.outcomes[0].2, ApplyOutcome::Failed(_)));
        assert_eq!(reporter.outcomes[1].2, ApplyOutcome::Applied);
    }
}
