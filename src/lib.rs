//! Resume intake for the interview coach app.
//!
//! Heuristic PDF text extraction, the caller-side usability policy, the
//! resume storage slot and the chat-completion payloads, exposed to the JS
//! host through `wasm-bindgen`.

mod assembly;
pub mod coach_request;
mod console;
pub mod file_utils;
pub mod intake;
pub mod schema;
pub mod text_extract;

pub use assembly::{
    build_coach_request, extract_pdf_text, extract_pdf_text_base64, ingest_document,
    ingest_document_base64, read_coach_response,
};
pub use schema::{DocumentKind, IntakeError, IntakeOptions, IntakeOutcome};
pub use text_extract::extract_text;
