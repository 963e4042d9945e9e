//! Batch processing over a directory of chat exports.
//!
//! An export directory holds one subdirectory per conversation, each with
//! its HTML document next to the exported media. Only documents exactly one
//! level below the given directory are considered.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::AlignConfig;
use crate::error::{AlignError, Result};
use crate::models::BatchResult;
use crate::process::DocumentProcessor;
use crate::report::Reporter;

/// Find `*.html` documents in the immediate subdirectories of `dir`.
///
/// Results are sorted by path. Unreadable subdirectories are skipped with a
/// warning; an unreadable `dir` is an error.
pub fn discover_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(AlignError::DirectoryNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(AlignError::NotADirectory(dir.to_path_buf()));
    }

    let mut documents = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_html(entry.path()) {
            documents.push(entry.into_path());
        }
    }

    Ok(documents)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html"))
}

/// Display name for a document in batch results: its path relative to the
/// scanned directory.
fn document_name(root: &Path, document: &Path) -> String {
    document
        .strip_prefix(root)
        .unwrap_or(document)
        .display()
        .to_string()
}

/// Runs [`DocumentProcessor`] over every discovered document.
pub struct BatchRunner {
    processor: DocumentProcessor,
}

impl BatchRunner {
    pub fn new(config: AlignConfig) -> Self {
        Self {
            processor: DocumentProcessor::new(config),
        }
    }

    /// Process all documents below `dir`.
    ///
    /// A document that is missing or fails to load is recorded in
    /// `failed_html_files` and the batch moves on.
    pub fn run(&self, dir: &Path, reporter: &mut dyn Reporter) -> Result<BatchResult> {
        let documents = discover_documents(dir)?;
        tracing::info!(
            "Found {} documents under {}",
            documents.len(),
            dir.display()
        );

        let mut result = BatchResult {
            scanned_files: documents.len(),
            ..BatchResult::default()
        };
        reporter.batch_started(&documents);

        for document in &documents {
            let name = document_name(dir, document);
            match self.processor.process(document, reporter) {
                Ok(Some(doc_result)) => result.add_document(name, &doc_result),
                Ok(None) => result.add_failure(name),
                Err(e) => {
                    tracing::error!("Failed to process {}: {}", document.display(), e);
                    reporter.document_failed(document, &e);
                    result.add_failure(name);
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_discovers_one_level_below() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("top.html"));
        touch(&root.join("bob/chat.html"));
        touch(&root.join("alice/chat.HTML"));
        touch(&root.join("alice/notes.txt"));
        touch(&root.join("alice/nested/deep.html"));

        let found = discover_documents(root).unwrap();
        assert_eq!(
            found,
            vec![root.join("alice/chat.HTML"), root.join("bob/chat.html")]
        );
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let err = discover_documents(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, AlignError::DirectoryNotFound(_)));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("chat.html");
        touch(&file);
        let err = discover_documents(&file).unwrap_err();
        assert!(matches!(err, AlignError::NotADirectory(_)));
    }

    #[test]
    fn test_document_name_is_relative() {
        let root = Path::new("/exports");
        assert_eq!(
            document_name(root, Path::new("/exports/alice/chat.html")),
            Path::new("alice").join("chat.html").display().to_string()
        );
    }
}
