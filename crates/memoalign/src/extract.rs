//! Video record extraction from exported chat documents.
//!
//! The exporter embeds one object per message into a script block. Across
//! exporter versions the object was written in two shapes:
//!
//! ```text
//! { type:43, text: './video/a.mp4', ..., timestamp:1514809949, ... }
//! {"type": 43, "text": "./video/a.mp4", ..., "timestamp": 1514809949, ...}
//! ```
//!
//! Neither shape is reliably valid JSON, so records are recognized with one
//! pattern per shape. Gaps between fields may not contain `}`, which keeps
//! a match inside a single record.

use std::collections::HashSet;
use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::models::VideoRecord;

/// Message type code the exporter uses for video attachments.
pub const VIDEO_TYPE_CODE: u32 = 43;

/// File extension of exported videos (matched case-insensitively).
pub const VIDEO_EXTENSION: &str = "mp4";

/// Known serializations of an attachment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordShape {
    /// Bare keys, single- or double-quoted path: `type:43, text:'...'`.
    Unquoted,
    /// Quoted keys: `"type": 43, "text": "..."`. The timestamp value may
    /// be quoted as well.
    Quoted,
}

impl RecordShape {
    /// All shapes, in the order they are applied.
    pub const ALL: [RecordShape; 2] = [RecordShape::Unquoted, RecordShape::Quoted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unquoted => "unquoted",
            Self::Quoted => "quoted",
        }
    }

    /// Pattern with two captures: the relative path and the timestamp digits.
    fn pattern(&self) -> String {
        match self {
            Self::Unquoted => format!(
                r#"(?i)type\s*:\s*{code}[^}}]*?text\s*:\s*["']([^"']+\.{ext})["'][^}}]*?timestamp\s*:\s*(\d+)"#,
                code = VIDEO_TYPE_CODE,
                ext = VIDEO_EXTENSION,
            ),
            Self::Quoted => format!(
                r#"(?i)"type"\s*:\s*{code}[^}}]*?"text"\s*:\s*"([^"]+\.{ext})"[^}}]*?"timestamp"\s*:\s*"?(\d+)"#,
                code = VIDEO_TYPE_CODE,
                ext = VIDEO_EXTENSION,
            ),
        }
    }
}

impl fmt::Display for RecordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finds video records in document text.
pub struct RecordExtractor {
    rules: Vec<(RecordShape, Regex)>,
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor {
    /// Create an extractor that recognizes every known shape.
    pub fn new() -> Self {
        Self::with_shapes(&RecordShape::ALL)
    }

    /// Create an extractor limited to the given shapes, applied in order.
    pub fn with_shapes(shapes: &[RecordShape]) -> Self {
        let rules = shapes
            .iter()
            .map(|shape| {
                let regex = Regex::new(&shape.pattern()).expect("record pattern should compile");
                (*shape, regex)
            })
            .collect();
        Self { rules }
    }

    /// Extract all video records.
    ///
    /// All matches of the first shape come before those of the second; within
    /// a shape, matches are in document order. Nothing is deduplicated, so a
    /// record that satisfies both shapes appears twice. Records with a
    /// missing or malformed path or timestamp produce no match; a digit run
    /// too large for a timestamp is still a match and fails when applied.
    pub fn extract(&self, text: &str) -> Vec<VideoRecord> {
        let mut records = Vec::new();

        for (shape, regex) in &self.rules {
            for cap in regex.captures_iter(text) {
                let (Some(path), Some(digits)) = (cap.get(1), cap.get(2)) else {
                    continue;
                };

                records.push(VideoRecord::new(path.as_str(), digits.as_str(), *shape));
            }
        }

        tracing::debug!("Extracted {} video records", records.len());
        records
    }
}

/// Drop repeated (path, timestamp) pairs, keeping the first occurrence.
pub fn dedupe_records(records: Vec<VideoRecord>) -> Vec<VideoRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert((r.relative_path.clone(), r.timestamp.clone())))
        .collect()
}
