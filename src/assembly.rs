//! # Assembly Module
//!
//! WASM-exported functions. This is the bridge between the JS host (the
//! mobile app shell) and the Rust intake logic.
//!
//! Functions that can fail return a `JsValue` holding a JSON string: the
//! result object on success, or `{"error": "..."}` on failure. The two
//! `extract_pdf_text*` functions return plain strings and signal failure
//! with an empty string, like the extractor itself.

use crate::coach_request::{build_request, read_response, request_headers, CoachConfig};
use crate::intake;
use crate::schema::{IntakeError, IntakeOptions};
use crate::text_extract::extract_text;
use base64::Engine;
use serde::Serialize;
use serde_json::json;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;

/// Extracts text from raw PDF bytes.
///
/// Returns an empty string when nothing was found. The host decides whether
/// the result is long enough to use; see `ingest_document` for the
/// built-in policy.
#[wasm_bindgen]
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    extract_text(bytes)
}

/// Extracts text from base64-encoded PDF bytes. Undecodable input yields an empty string.
#[wasm_bindgen]
pub fn extract_pdf_text_base64(base64_bytes: &str) -> String {
    match base64::engine::general_purpose::STANDARD.decode(base64_bytes.trim()) {
        Ok(bytes) => extract_text(&bytes),
        Err(_) => String::new(),
    }
}

/// Ingests an uploaded resume from raw bytes.
///
/// # Parameters
///
/// * `bytes` - The complete file contents.
/// * `filename` - Optional filename; `.pdf` and `.txt` are recognized.
/// * `mime_type` - Optional MIME type from the document picker. Takes precedence over `filename`.
/// * `options_json` - Optional JSON matching `IntakeOptions`. Invalid JSON falls back to defaults.
///
/// # Returns
///
/// `{"kind": "pdf", "text": "...", "char_count": 42}` on success.
/// `{"error": "...", "detected": "pdf"}` on failure. A `NoUsableText` error
/// means the host should offer manual entry or a `.txt` file.
///
/// # Example
///
/// ```javascript
/// const result = JSON.parse(ingest_document(bytes, file.name, file.mimeType, null));
/// if (result.error) {
///     Alert.alert("Unable to Extract Text", result.error);
/// }
/// ```
#[wasm_bindgen]
pub fn ingest_document(
    bytes: &[u8],
    filename: Option<String>,
    mime_type: Option<String>,
    options_json: Option<String>,
) -> JsValue {
    let options = parse_options(options_json);
    let result = intake::ingest_document(bytes, filename.as_deref(), mime_type.as_deref(), &options);
    let detected = crate::file_utils::detect_type(filename.as_deref(), mime_type.as_deref(), bytes);
    to_js(result, Some(detected.as_str()))
}

/// Ingests an uploaded resume from base64 bytes. See [`ingest_document`].
#[wasm_bindgen]
pub fn ingest_document_base64(
    base64_bytes: &str,
    filename: Option<String>,
    mime_type: Option<String>,
    options_json: Option<String>,
) -> JsValue {
    // convenience wrapper; the file picker hands PDFs over as base64
    match base64::engine::general_purpose::STANDARD.decode(base64_bytes.trim()) {
        Ok(bytes) => ingest_document(&bytes, filename, mime_type, options_json),
        Err(e) => to_js::<()>(Err(IntakeError::Base64(e)), None),
    }
}

/// Builds the chat-completion call for a recorded answer.
///
/// `config_json` must contain at least `api_key`. Returns
/// `{"url": "...", "headers": {...}, "body": {...}}` ready for `fetch`.
#[wasm_bindgen]
pub fn build_coach_request(resume_text: &str, base64_audio: &str, config_json: &str) -> JsValue {
    let result = CoachConfig::from_json(config_json).and_then(|config| {
        let body = build_request(&config, resume_text, base64_audio)?;
        let headers: serde_json::Map<String, serde_json::Value> = request_headers(&config)
            .into_iter()
            .map(|(name, value)| (name, value.into()))
            .collect();
        Ok(json!({
            "url": config.endpoint,
            "headers": headers,
            "body": body,
        }))
    });
    to_js(result, None)
}

/// Reads feedback out of a chat-completion response body. Returns `{"content": "..."}`.
#[wasm_bindgen]
pub fn read_coach_response(response_json: &str) -> JsValue {
    to_js(read_response(response_json).map(|content| json!({ "content": content })), None)
}

fn parse_options(options_json: Option<String>) -> IntakeOptions {
    match options_json {
        Some(s) => serde_json::from_str(&s).unwrap_or_default(),
        None => IntakeOptions::default(),
    }
}

fn to_json<T: Serialize>(result: Result<T, IntakeError>, detected: Option<&str>) -> String {
    match result {
        Ok(value) => match serde_json::to_string(&value) {
            Ok(s) => s,
            Err(_) => json!({"error": "serialization failed"}).to_string(),
        },
        Err(err) => match detected {
            Some(kind) => json!({"error": err.to_string(), "detected": kind}).to_string(),
            None => json!({"error": err.to_string()}).to_string(),
        },
    }
}

fn to_js<T: Serialize>(result: Result<T, IntakeError>, detected: Option<&str>) -> JsValue {
    JsValue::from_str(&to_json(result, detected))
}
