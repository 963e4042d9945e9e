//! memoalign - restore capture times of videos referenced by chat exports.
//!
//! Chat-export HTML documents embed one attachment record per message. For
//! video attachments the record carries the video's relative path and the
//! Unix timestamp of the message. This crate pulls those pairs out of the
//! document text and writes the timestamps back onto the video files as
//! their access and modification times.
//!
//! The pipeline is synchronous and runs in four stages:
//!
//! - [`loader`] decodes a document with an encoding fallback chain.
//! - [`extract`] recognizes the known record shapes in the decoded text.
//! - [`apply`] resolves each relative path and sets the file times.
//! - [`process`] and [`batch`] drive the stages over one or many documents.

pub mod apply;
pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod loader;
pub mod models;
pub mod process;
pub mod report;

pub use apply::{apply_timestamp, normalize_relative_path, resolve_target, ApplyOutcome};
pub use batch::{discover_documents, BatchRunner};
pub use config::AlignConfig;
pub use error::{AlignError, Result};
pub use extract::{RecordExtractor, RecordShape, VIDEO_EXTENSION, VIDEO_TYPE_CODE};
pub use loader::{read_document, DecodedDocument, SourceEncoding};
pub use models::{BatchResult, ProcessingResult, VideoRecord};
pub use process::DocumentProcessor;
pub use report::{NoopReporter, Reporter};
