use crate::schema::DocumentKind;

/// Detects whether an upload is a PDF or plain text.
///
/// # Arguments
///
/// * `filename` - Optional filename for extension-based detection
/// * `mime_type` - Optional MIME type reported by the file picker
/// * `bytes` - The file contents for magic byte detection
///
/// # Detection Strategy
///
/// 1. MIME type (`application/pdf`, `text/plain`)
/// 2. Filename extension check (case-insensitive)
/// 3. Magic bytes check for PDF (%PDF header)
/// 4. Text detection: valid UTF-8 with no control characters besides tab, CR and LF
pub fn detect_type(filename: Option<&str>, mime_type: Option<&str>, bytes: &[u8]) -> DocumentKind {
    if let Some(mime) = mime_type {
        match mime.trim().to_ascii_lowercase().as_str() {
            "application/pdf" => return DocumentKind::Pdf,
            "text/plain" => return DocumentKind::Txt,
            _ => {}
        }
    }
    if let Some(name) = filename {
        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            return DocumentKind::Pdf;
        }
        if lower.ends_with(".txt") {
            return DocumentKind::Txt;
        }
    }
    // fallback: magic
    if bytes.len() >= 4 && &bytes[0..4] == b"%PDF" {
        return DocumentKind::Pdf;
    }
    if looks_like_text(bytes) {
        return DocumentKind::Txt;
    }
    DocumentKind::Unknown
}

fn looks_like_text(bytes: &[u8]) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(s) => s
            .chars()
            .all(|c| c == '\t' || c == '\n' || c == '\r' || !c.is_control()),
        Err(_) => false,
    }
}
