//! Data structures and types for resume intake.
//!
//! This module defines the error type shared by intake, the resume cache and
//! the coach request builder, plus the serializable options and results that
//! cross the wasm boundary as JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum extracted length, in characters, for PDF text to count as usable.
pub const DEFAULT_MIN_PDF_CHARS: usize = 10;

/// Errors that can occur around text extraction.
///
/// The extractor itself never fails; these cover the caller-side policy,
/// storage and the chat request.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The upload is neither a PDF nor plain text.
    #[error("Unsupported or unrecognized format")]
    UnsupportedFormat,
    /// Extraction found too little text to use. The host should offer manual entry.
    #[error("Could not extract usable text ({found} characters found, {required} required)")]
    NoUsableText { found: usize, required: usize },
    /// A plain-text upload was not valid UTF-8.
    #[error("Text is not valid UTF-8")]
    InvalidText,
    /// The base64 payload could not be decoded.
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The resume store failed.
    #[error("Storage error: {0}")]
    Storage(String),
    /// No resume has been saved yet.
    #[error("No resume saved")]
    NoResume,
    /// The recording is empty.
    #[error("Audio recording is empty")]
    EmptyAudio,
    /// Required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
    /// The chat-completion API reported an error.
    #[error("API error: {0}")]
    Api(String),
    /// A JSON document could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What an upload was detected as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Txt,
    Unknown,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Txt => "txt",
            DocumentKind::Unknown => "unknown",
        }
    }
}

/// Options for the intake policy.
///
/// All fields are optional. Deserialized from JSON supplied by the host:
/// ```json
/// { "min_pdf_chars": 20 }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct IntakeOptions {
    /// Extracted PDF text shorter than this is rejected. Defaults to 10.
    pub min_pdf_chars: Option<usize>,
}

impl IntakeOptions {
    pub fn min_pdf_chars(&self) -> usize {
        self.min_pdf_chars.unwrap_or(DEFAULT_MIN_PDF_CHARS)
    }
}

impl Default for IntakeOptions {
    fn default() -> Self {
        Self {
            min_pdf_chars: Some(DEFAULT_MIN_PDF_CHARS),
        }
    }
}

/// A successfully ingested resume.
#[derive(Debug, Serialize, Deserialize)]
pub struct IntakeOutcome {
    pub kind: DocumentKind,
    pub text: String,
    /// Length of `text` in characters, as shown to the user on save.
    pub char_count: usize,
}
