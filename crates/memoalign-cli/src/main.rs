//! memoalign - restore capture times of chat-export videos.
//!
//! Reads exported chat-log HTML documents, recovers the timestamp of every
//! embedded video record, and applies it to the video file on disk.

mod cli;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    let verbose = cli::is_verbose();
    let default_filter = if verbose {
        "memoalign=info"
    } else {
        "memoalign=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli::run().await {
        // Full error chain only in verbose mode
        if verbose {
            eprintln!("{} Error: {:?}", cli::marks::Mark::Failed, e);
        } else {
            eprintln!("{} Error: {}", cli::marks::Mark::Failed, e);
        }
        std::process::exit(1);
    }
}
