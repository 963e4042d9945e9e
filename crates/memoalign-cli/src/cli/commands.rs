//! CLI parser and dispatch between single-document and batch mode.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgGroup, Parser};
use console::style;
use memoalign::{AlignConfig, BatchRunner, DocumentProcessor};

use super::marks::Mark;
use super::reporter::{print_batch_summary, print_document_summary, ConsoleReporter};

/// Exit status used when the user interrupts a run.
const EXIT_INTERRUPTED: i32 = 130;

#[derive(Parser, Debug)]
#[command(name = "memoalign")]
#[command(about = "Restore capture times of chat-export videos from their HTML records")]
#[command(version)]
#[command(group(ArgGroup::new("input").required(true).args(["html_file", "directory"])))]
#[command(after_help = "Examples:
  memoalign chat_export.html
  memoalign chat_export.html -b /path/to/videos -v
  memoalign -d ~/Exports/WeChat
  memoalign --directory ~/Exports/WeChat --dry-run")]
pub struct Cli {
    /// HTML document to process (single-document mode)
    html_file: Option<PathBuf>,

    /// Directory whose subfolders each hold one exported chat (batch mode)
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Directory to resolve video paths against (defaults to each document's directory)
    #[arg(short, long, env = "MEMOALIGN_BASE_PATH")]
    base_path: Option<PathBuf>,

    /// Show full paths and matched record shapes
    #[arg(short, long)]
    verbose: bool,

    /// Check which videos would be updated without changing them
    #[arg(long)]
    dry_run: bool,

    /// Process each (path, timestamp) pair only once per document
    #[arg(long)]
    dedupe: bool,

    /// Print the final result as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> AlignConfig {
        AlignConfig {
            base_path: self.base_path.clone(),
            dry_run: self.dry_run,
            dedupe: self.dedupe,
        }
    }
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Parse arguments and run to completion or until interrupted.
///
/// The pipeline is synchronous; it runs on a blocking task so Ctrl-C can be
/// handled without a panic or backtrace.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let work = tokio::task::spawn_blocking(move || execute(&cli));

    tokio::select! {
        joined = work => joined.context("processing task panicked")?,
        _ = tokio::signal::ctrl_c() => {
            println!("\n{} Cancelled by user", Mark::Partial);
            std::process::exit(EXIT_INTERRUPTED);
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.config();

    if cli.verbose && !cli.json {
        print_header(cli);
    }

    match (&cli.directory, &cli.html_file) {
        (Some(dir), _) => run_batch(dir, config, cli),
        (None, Some(file)) => run_single(file, config, cli),
        (None, None) => anyhow::bail!("Either an HTML file or --directory is required"),
    }
}

fn print_header(cli: &Cli) {
    println!("{}", style("memoalign - video timestamp alignment").bold());
    if let Some(ref dir) = cli.directory {
        println!("  Batch directory: {}", dir.display());
    }
    if let Some(ref file) = cli.html_file {
        println!("  HTML file:       {}", file.display());
    }
    match cli.base_path {
        Some(ref base) => println!("  Base path:       {}", base.display()),
        None => println!("  Base path:       {}", style("(document directory)").dim()),
    }
    if cli.dry_run {
        println!(
            "{} Dry run mode - no timestamps will be changed",
            Mark::Partial
        );
    }
    println!("{}", style("=".repeat(50)).dim());
}

fn run_single(file: &Path, config: AlignConfig, cli: &Cli) -> anyhow::Result<()> {
    let processor = DocumentProcessor::new(config);
    let mut reporter = ConsoleReporter::new(cli.verbose).quiet(cli.json);

    let result = processor
        .process(file, &mut reporter)
        .with_context(|| format!("Failed to process {}", file.display()))?;
    tracing::debug!("Single-document result: {:?}", result);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if let Some(result) = result.filter(|r| r.total_found() > 0) {
        print_document_summary(&result);
    }
    Ok(())
}

fn run_batch(dir: &Path, config: AlignConfig, cli: &Cli) -> anyhow::Result<()> {
    let runner = BatchRunner::new(config);
    let mut reporter = ConsoleReporter::new(cli.verbose).quiet(cli.json);

    if !cli.json {
        println!("{} Scanning {}", Mark::Step, dir.display());
    }

    let result = runner.run(dir, &mut reporter);
    reporter.finish();
    let result = result.with_context(|| format!("Batch processing of {} failed", dir.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.scanned_files == 0 {
        println!("{} No HTML files found", Mark::Partial);
        return Ok(());
    }

    print_batch_summary(&result);
    Ok(())
}
