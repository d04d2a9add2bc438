//! # Resume Intake
//!
//! Turns an uploaded document into resume text and keeps it in a fixed
//! storage slot.
//!
//! The extractor in [`crate::text_extract`] returns whatever it finds. The
//! "is this usable" judgment lives here: extracted PDF text shorter than
//! [`IntakeOptions::min_pdf_chars`] (10 by default) is rejected with
//! [`IntakeError::NoUsableText`], and the host is expected to offer manual
//! entry or a `.txt` upload instead.

use std::collections::HashMap;

use base64::Engine;

use crate::console;
use crate::file_utils::detect_type;
use crate::schema::{DocumentKind, IntakeError, IntakeOptions, IntakeOutcome};
use crate::text_extract::extract_text;

/// Storage slot the resume text lives under.
pub const RESUME_STORAGE_KEY: &str = "stored_resume_text";

/// Returns true when `text` has at least `min_chars` characters.
pub fn is_usable_text(text: &str, min_chars: usize) -> bool {
    text.chars().count() >= min_chars
}

/// Ingest an uploaded document.
///
/// PDFs go through the heuristic extractor and the minimum-length policy.
/// Plain text must be valid UTF-8 and not blank; it is stored as-is.
///
/// # Errors
///
/// - [`IntakeError::UnsupportedFormat`] when the upload is neither PDF nor text
/// - [`IntakeError::NoUsableText`] when too little text was found
/// - [`IntakeError::InvalidText`] when a text upload is not UTF-8
pub fn ingest_document(
    bytes: &[u8],
    filename: Option<&str>,
    mime_type: Option<&str>,
    options: &IntakeOptions,
) -> Result<IntakeOutcome, IntakeError> {
    let kind = detect_type(filename, mime_type, bytes);
    console::log(&format!("ingesting {} bytes as {}", bytes.len(), kind.as_str()));

    let text = match kind {
        DocumentKind::Pdf => {
            let text = extract_text(bytes);
            let required = options.min_pdf_chars();
            if !is_usable_text(&text, required) {
                let found = text.chars().count();
                console::warn(&format!("pdf extraction found {found} characters"));
                return Err(IntakeError::NoUsableText { found, required });
            }
            text
        }
        DocumentKind::Txt => {
            let text = std::str::from_utf8(bytes).map_err(|_| IntakeError::InvalidText)?;
            if text.trim().is_empty() {
                return Err(IntakeError::NoUsableText {
                    found: 0,
                    required: 1,
                });
            }
            text.to_string()
        }
        DocumentKind::Unknown => return Err(IntakeError::UnsupportedFormat),
    };

    Ok(IntakeOutcome {
        kind,
        char_count: text.chars().count(),
        text,
    })
}

/// Same as [`ingest_document`], for a base64 payload (standard alphabet).
pub fn ingest_document_base64(
    base64_bytes: &str,
    filename: Option<&str>,
    mime_type: Option<&str>,
    options: &IntakeOptions,
) -> Result<IntakeOutcome, IntakeError> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(base64_bytes.trim())?;
    ingest_document(&bytes, filename, mime_type, options)
}

/// Key-value storage for the resume slot.
pub trait ResumeStore {
    fn get(&self, key: &str) -> Result<Option<String>, IntakeError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), IntakeError>;
    fn remove(&mut self, key: &str) -> Result<(), IntakeError>;
}

/// In-memory [`ResumeStore`].
#[derive(Debug, Default)]
pub struct MemoryResumeStore {
    entries: HashMap<String, String>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResumeStore for MemoryResumeStore {
    fn get(&self, key: &str) -> Result<Option<String>, IntakeError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), IntakeError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), IntakeError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// The saved resume, under [`RESUME_STORAGE_KEY`].
pub struct ResumeCache<S: ResumeStore> {
    store: S,
}

impl<S: ResumeStore> ResumeCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Save resume text, replacing any previous one. Blank text is rejected.
    pub fn save(&mut self, text: &str) -> Result<usize, IntakeError> {
        if text.trim().is_empty() {
            return Err(IntakeError::NoUsableText {
                found: 0,
                required: 1,
            });
        }
        self.store.set(RESUME_STORAGE_KEY, text)?;
        Ok(text.chars().count())
    }

    pub fn load(&self) -> Result<Option<String>, IntakeError> {
        Ok(self
            .store
            .get(RESUME_STORAGE_KEY)?
            .filter(|text| !text.is_empty()))
    }

    pub fn has_resume(&self) -> Result<bool, IntakeError> {
        Ok(self.load()?.is_some())
    }

    pub fn clear(&mut self) -> Result<(), IntakeError> {
        self.store.remove(RESUME_STORAGE_KEY)
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
