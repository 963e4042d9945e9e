//! Pipeline configuration.

use std::path::{Path, PathBuf};

/// Options shared by single-document and batch processing.
#[derive(Debug, Clone, Default)]
pub struct AlignConfig {
    /// Directory that extracted relative paths are resolved against.
    /// When unset, each document's own directory is used.
    pub base_path: Option<PathBuf>,
    /// Resolve and check targets without changing any timestamps.
    pub dry_run: bool,
    /// Drop repeated (path, timestamp) pairs within a document.
    pub dedupe: bool,
}

impl AlignConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Base directory for a given document: the override if configured,
    /// otherwise the document's parent directory.
    pub fn base_dir_for(&self, document: &Path) -> PathBuf {
        match &self.base_path {
            Some(base) => base.clone(),
            None => document
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_defaults_to_document_parent() {
        let config = AlignConfig::new();
        assert_eq!(
            config.base_dir_for(Path::new("/exports/alice/chat.html")),
            PathBuf::from("/exports/alice")
        );
    }

    #[test]
    fn test_base_dir_override() {
        let config = AlignConfig::new().with_base_path("/videos");
        assert_eq!(
            config.base_dir_for(Path::new("/exports/alice/chat.html")),
            PathBuf::from("/videos")
        );
    }

    #[test]
    fn test_bare_filename_resolves_to_current_dir() {
        // Path::parent of "chat.html" is Some(""), which joins like "."
        let config = AlignConfig::new();
        let base = config.base_dir_for(Path::new("chat.html"));
        assert_eq!(base.join("a.mp4"), PathBuf::from("a.mp4"));
    }
}
