//! Console reporting for single-document and batch runs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use memoalign::{
    normalize_relative_path, AlignError, ApplyOutcome, BatchResult, ProcessingResult, Reporter,
    VideoRecord,
};

use super::marks::Mark;

/// Prints per-record and per-document progress to stdout.
///
/// In batch mode a progress bar tracks documents and all lines are routed
/// through it so they do not collide with the bar.
pub struct ConsoleReporter {
    verbose: bool,
    quiet: bool,
    progress: Option<ProgressBar>,
    position: usize,
    total: usize,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
            progress: None,
            position: 0,
            total: 0,
        }
    }

    /// Suppress all output (used for `--json`).
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Clear the batch progress bar, if any.
    pub fn finish(&mut self) {
        if let Some(pb) = self.progress.take() {
            pb.finish_and_clear();
        }
    }

    fn line(&self, message: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match &self.progress {
            Some(pb) => pb.println(message.as_ref()),
            None => println!("{}", message.as_ref()),
        }
    }

    fn advance(&self) {
        if let Some(ref pb) = self.progress {
            pb.inc(1);
        }
    }

    fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .progress_chars("█▓░"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

impl Reporter for ConsoleReporter {
    fn batch_started(&mut self, documents: &[PathBuf]) {
        self.total = documents.len();
        if documents.is_empty() {
            return;
        }

        self.line(format!(
            "{} Found {} HTML files:",
            Mark::Step,
            documents.len()
        ));
        for doc in documents {
            self.line(format!("  {} {}", Mark::Entry, doc.display()));
        }

        if !self.quiet {
            self.progress = Some(Self::create_progress_bar(documents.len() as u64));
        }
    }

    fn document_started(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if self.total > 0 {
            self.position += 1;
            self.line(format!(
                "\n{} [{}/{}] {} {}",
                Mark::Step,
                self.position,
                self.total,
                style(&name).bold(),
                style(format!("({})", path.parent().unwrap_or(path).display())).dim()
            ));
            if let Some(ref pb) = self.progress {
                pb.set_message(name);
            }
        } else {
            self.line(format!(
                "{} Reading HTML file: {}",
                Mark::Step,
                path.display()
            ));
        }
    }

    fn document_missing(&mut self, path: &Path) {
        if self.total > 0 {
            self.position += 1;
        }
        self.line(format!(
            "{} HTML file not found: {}",
            Mark::Failed,
            path.display()
        ));
        self.advance();
    }

    fn records_found(&mut self, _path: &Path, count: usize) {
        if count == 0 {
            self.line(format!("  {} No matching videos found", Mark::Partial));
            self.advance();
        } else {
            self.line(format!("  {} Found {} videos", Mark::Step, count));
        }
    }

    fn record_processed(&mut self, record: &VideoRecord, target: &Path, outcome: &ApplyOutcome) {
        let when = record
            .captured_at()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "out of range".to_string());

        self.line(format!(
            "\n  {}",
            normalize_relative_path(&record.relative_path)
        ));
        self.line(format!(
            "    Timestamp: {} {}",
            record.timestamp,
            style(format!("({})", when)).dim()
        ));
        if self.verbose {
            self.line(format!("    Full path: {}", target.display()));
            self.line(format!("    Matched as: {}", record.shape));
        }

        let status = match outcome {
            ApplyOutcome::Applied => format!("{} Updated file time", Mark::Done),
            ApplyOutcome::DryRun => {
                format!("{} Would update file time (dry run)", Mark::Done)
            }
            ApplyOutcome::NotFound => {
                format!("{} File not found: {}", Mark::Failed, target.display())
            }
            ApplyOutcome::Failed(reason) => {
                format!("{} Failed to update file time: {}", Mark::Failed, reason)
            }
        };
        self.line(format!("    {}", status));
    }

    fn document_finished(&mut self, _path: &Path, result: &ProcessingResult) {
        self.line(format!(
            "\n  {} {}/{} files updated",
            Mark::Step,
            result.success_count(),
            result.total_found()
        ));
        self.advance();
    }

    fn document_failed(&mut self, path: &Path, error: &AlignError) {
        self.line(format!(
            "{} Error processing {}: {}",
            Mark::Failed,
            path.display(),
            error
        ));
        self.advance();
    }
}

/// Print the final tallies of a single-document run.
pub fn print_document_summary(result: &ProcessingResult) {
    println!("\n{}", style("=".repeat(50)).dim());
    println!("{} Summary:", Mark::Done);
    println!("  Videos found:   {}", style(result.total_found()).dim());
    println!("  Videos updated: {}", style(result.success_count()).green());
    if result.failed_count() > 0 {
        println!("  Failed:         {}", style(result.failed_count()).red());
    }

    if result.all_succeeded() {
        println!("{} All video timestamps updated", Mark::Done);
    } else if result.success_count() > 0 {
        println!(
            "{} Partially complete: {}/{} files updated",
            Mark::Partial,
            result.success_count(),
            result.total_found()
        );
    } else {
        println!("{} No files were updated", Mark::Failed);
    }
    println!("{}", style("=".repeat(50)).dim());
}

/// Print the aggregate tallies of a batch run.
pub fn print_batch_summary(result: &BatchResult) {
    println!("\n{}", style("=".repeat(60)).dim());
    println!("{} Batch summary:", Mark::Done);
    println!("  HTML files scanned:   {}", style(result.scanned_files).dim());
    println!(
        "  HTML files processed: {}",
        style(result.processed_files).green()
    );
    if !result.empty_html_files.is_empty() {
        println!(
            "  Without videos:       {}",
            style(result.empty_html_files.len()).yellow()
        );
    }
    if !result.failed_html_files.is_empty() {
        println!(
            "  HTML files failed:    {} ({})",
            style(result.failed_html_files.len()).red(),
            result.failed_html_files.join(", ")
        );
    }

    println!();
    println!("  Videos found:   {}", style(result.total_videos_found).dim());
    println!(
        "  Videos updated: {}",
        style(result.total_videos_success).green()
    );
    if result.total_videos_failed > 0 {
        println!(
            "  Failed:         {}",
            style(result.total_videos_failed).red()
        );
    }

    if result.all_succeeded() {
        println!("{} All video timestamps updated", Mark::Done);
    } else if result.total_videos_success > 0 {
        println!(
            "{} Partially complete: {}/{} files updated ({:.1}%)",
            Mark::Partial,
            result.total_videos_success,
            result.total_videos_found,
            result.success_rate().unwrap_or(0.0)
        );
    } else {
        println!("{} No video files were updated", Mark::Failed);
    }
    println!("{}", style("=".repeat(60)).dim());
}
