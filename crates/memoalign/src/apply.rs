//! Target path resolution and timestamp application.

use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use serde::Serialize;

/// Result of applying one record's timestamp to its video file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum ApplyOutcome {
    /// Access and modification times were set.
    Applied,
    /// Target exists; times left untouched because of a dry run.
    DryRun,
    /// Target file does not exist.
    NotFound,
    /// The OS refused the change.
    Failed(String),
}

impl ApplyOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Applied | Self::DryRun)
    }
}

/// Strip the leading relative marker from an extracted path.
///
/// Every leading `.` and `/` is removed, not just a literal `./`, so
/// `../x.mp4` and `.hidden.mp4` lose their dots as well.
pub fn normalize_relative_path(path: &str) -> &str {
    path.trim_start_matches(['.', '/'])
}

/// Join an extracted path onto the base directory.
pub fn resolve_target(base_dir: &Path, relative_path: &str) -> PathBuf {
    base_dir.join(normalize_relative_path(relative_path))
}

/// Set both access and modification time of `path` to `timestamp`, a
/// digit run of whole seconds since the Unix epoch.
///
/// Never returns an error: a missing file, a timestamp out of range or a
/// refused change is reported through the outcome so callers can carry on
/// with the next record.
pub fn apply_timestamp(path: &Path, timestamp: &str, dry_run: bool) -> ApplyOutcome {
    apply_with(path, timestamp, dry_run, |path, time| {
        filetime::set_file_times(path, time, time)
    })
}

fn apply_with<F>(path: &Path, timestamp: &str, dry_run: bool, set_times: F) -> ApplyOutcome
where
    F: FnOnce(&Path, FileTime) -> io::Result<()>,
{
    // Missing videos are common and reported by the caller.
    if !path.exists() {
        tracing::debug!("Video not found: {}", path.display());
        return ApplyOutcome::NotFound;
    }

    let Ok(secs) = timestamp.parse::<i64>() else {
        tracing::warn!(
            "Timestamp {} out of range for {}",
            timestamp,
            path.display()
        );
        return ApplyOutcome::Failed(format!("timestamp {} out of range", timestamp));
    };

    if dry_run {
        return ApplyOutcome::DryRun;
    }

    match set_times(path, FileTime::from_unix_time(secs, 0)) {
        Ok(()) => ApplyOutcome::Applied,
        Err(e) => {
            tracing::warn!("Failed to set times on {}: {}", path.display(), e);
            ApplyOutcome::Failed(e.to_string())
        }
    }
}
