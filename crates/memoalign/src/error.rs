//! Error types for the alignment pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort processing of a document or a batch.
///
/// Per-record problems (missing video, refused timestamp change) are not
/// errors; they are reported through [`crate::ApplyOutcome`].
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to scan directory: {0}")]
    Walk(#[from] walkdir::Error),
}

impl AlignError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AlignError>;
