//! Document loading with an ordered encoding fallback.
//!
//! Exports are usually UTF-8, but older exporters on Chinese-locale systems
//! wrote GBK. Anything that decodes as neither is read as Latin-1, which
//! accepts every byte sequence, so loading only fails on I/O.

use std::fmt;
use std::path::Path;

use encoding_rs::GBK;
use serde::Serialize;

use crate::error::{AlignError, Result};

/// Encoding a document was successfully decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEncoding {
    Utf8,
    Gbk,
    Latin1,
}

impl SourceEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Gbk => "gbk",
            Self::Latin1 => "latin-1",
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded document text.
#[derive(Debug, Clone)]
pub struct DecodedDocument {
    pub text: String,
    pub encoding: SourceEncoding,
}

/// Read a document from disk and decode it.
///
/// The file handle is closed before this returns. Open/read failures are
/// returned as [`AlignError::Io`]; decoding never fails.
pub fn read_document(path: &Path) -> Result<DecodedDocument> {
    let bytes = std::fs::read(path).map_err(|e| AlignError::io(path, e))?;
    let decoded = decode_bytes(bytes);
    if decoded.encoding != SourceEncoding::Utf8 {
        tracing::debug!(
            "{} is not valid UTF-8, decoded as {}",
            path.display(),
            decoded.encoding
        );
    }
    Ok(decoded)
}

/// Decode raw bytes: strict UTF-8, then strict GBK, then Latin-1.
pub fn decode_bytes(bytes: Vec<u8>) -> DecodedDocument {
    let bytes = match String::from_utf8(bytes) {
        Ok(text) => {
            return DecodedDocument {
                text,
                encoding: SourceEncoding::Utf8,
            }
        }
        Err(e) => e.into_bytes(),
    };

    if let Some(text) = GBK.decode_without_bom_handling_and_without_replacement(&bytes) {
        return DecodedDocument {
            text: text.into_owned(),
            encoding: SourceEncoding::Gbk,
        };
    }

    DecodedDocument {
        text: decode_latin1(&bytes),
        encoding: SourceEncoding::Latin1,
    }
}

/// ISO-8859-1: every byte maps to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
