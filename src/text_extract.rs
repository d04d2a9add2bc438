//! Heuristic text extraction from PDF bytes.
//!
//! This module pulls displayed text out of simple PDFs by scanning for
//! literal strings, the `( ... )` operands of text-showing operators like
//! `Tj`. It does not parse PDF structure: no xref tables, no object streams,
//! no decompression, no font encodings. PDFs whose text lives in compressed
//! content streams yield an empty string.
//!
//! ## Naive scan
//!
//! Matching uses the pattern `\(([^)]+)\)`. It does not track nesting or
//! escaped parentheses, so a literal like `(A\(B\)C)` stops at the first
//! `)` and yields `A(B\`. Existing callers depend on this output, so the scan
//! keeps it.
//!
//! ## Usability
//!
//! [`extract_text`] never fails. An empty result means nothing was found.
//! Whether a short result is usable is for the caller to decide; see
//! [`crate::intake::is_usable_text`].

use once_cell::sync::Lazy;
use regex::Regex;

static LITERAL_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("literal string pattern is valid"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\n]+").expect("whitespace pattern is valid"));

/// Escape sequences resolved after joining, applied in this order.
const ESCAPES: [(&str, &str); 7] = [
    ("\\r\\n", "\n"),
    ("\\n", "\n"),
    ("\\r", ""),
    ("\\t", " "),
    ("\\(", "("),
    ("\\)", ")"),
    ("\\\\", "\\"),
];

/// Extract plain text from the raw bytes of a (presumed) PDF.
///
/// Tokens are joined by a single space in scan order, escapes are resolved,
/// whitespace runs are collapsed and the result is trimmed.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes. Not validated as PDF.
///
/// # Returns
///
/// The extracted text, or an empty string when no literal strings were found.
pub fn extract_text(bytes: &[u8]) -> String {
    let content = latin1_decode(bytes);
    let joined = scan_literal_strings(&content).join(" ");

    if joined.is_empty() {
        return String::new();
    }

    let resolved = resolve_escapes(&joined);
    collapse_whitespace(&resolved).trim().to_string()
}

/// Map each byte to the char with the same code point.
pub fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Interiors of every `( ... )` match, left to right, non-overlapping.
pub fn scan_literal_strings(content: &str) -> Vec<&str> {
    LITERAL_STRING
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Apply the escape table in order. Does not collapse whitespace.
pub fn resolve_escapes(s: &str) -> String {
    ESCAPES
        .iter()
        .fold(s.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// A run that contains a newline becomes one newline, any other run one space.
fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN
        .replace_all(s, |caps: &regex::Captures| {
            if caps[0].contains('\n') { "\n" } else { " " }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_coach_text_object() {
        let pdf = b"BT (Interview) Tj (Coach) Tj ET";
        assert_eq!(extract_text(pdf), "Interview Coach");
    }

    #[test]
    fn test_order_is_preserved() {
        let pdf = b"%PDF-1.4\n1 0 obj\nBT /F1 12 Tf (Hello) Tj ET\nendobj\n2 0 obj\nBT (World) Tj ET\nendobj";
        let text = extract_text(pdf);
        assert_eq!(text, "Hello World");
        assert!(text.find("Hello").unwrap() < text.find("World").unwrap());
    }

    #[test]
    fn test_plain_token_passes_through() {
        assert_eq!(extract_text(b"(Senior Rust Engineer)"), "Senior Rust Engineer");
    }

    #[test]
    fn test_newline_escape() {
        assert_eq!(extract_text(br"(Line1\nLine2)"), "Line1\nLine2");
        assert_eq!(extract_text(br"(Line1\r\nLine2)"), "Line1\nLine2");
    }

    #[test]
    fn test_carriage_return_and_tab_escapes() {
        assert_eq!(extract_text(br"(ab\rcd)"), "abcd");
        assert_eq!(extract_text(br"(Name:\tAda)"), "Name: Ada");
    }

    #[test]
    fn test_escaped_parens_truncate_at_first_close() {
        // The scan stops at the escaped ')' and "C)" is left unmatched.
        assert_eq!(extract_text(br"(A\(B\)C)"), "A(B\\");
    }

    #[test]
    fn test_nested_parens_truncate() {
        assert_eq!(extract_text(b"(a(b)c)"), "a(b");
    }

    #[test]
    fn test_backslash_escape() {
        assert_eq!(extract_text(br"(C:\\dir)"), "C:\\dir");
    }

    #[test]
    fn test_newline_escape_resolves_before_backslash() {
        // "\\n" loses to the earlier "\n" rule; the trailing newline is trimmed.
        assert_eq!(extract_text(br"(x\\n)"), "x\\");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(extract_text(b"(a    b)"), "a b");
        assert_eq!(extract_text(br"(a\t\tb)"), "a b");
        assert_eq!(extract_text(br"(a\n\n  b)"), "a\nb");
    }

    #[test]
    fn test_no_literal_strings() {
        let xref = b"xref\n0 3\n0000000000 65535 f \n0000000015 00000 n \ntrailer\n<< /Size 3 /Root 1 0 R >>\nstartxref\n120\n%%EOF";
        assert_eq!(extract_text(xref), "");
        assert_eq!(extract_text(b""), "");
    }

    #[test]
    fn test_empty_and_blank_tokens() {
        assert_eq!(extract_text(b"()(Hi)"), "Hi");
        assert_eq!(extract_text(b"(   )"), "");
    }

    #[test]
    fn test_high_bytes_map_to_latin1() {
        assert_eq!(extract_text(b"(Caf\xe9)"), "Caf\u{e9}");
        // Not valid UTF-8, still scanned.
        assert_eq!(extract_text(b"\xff\xfe(ok)\x80"), "ok");
    }

    #[test]
    fn test_deterministic() {
        let pdf = br"BT (R\(e\)sume) Tj (x\ty) Tj ET (tail";
        assert_eq!(extract_text(pdf), extract_text(pdf));
    }

    #[test]
    fn test_scan_literal_strings() {
        assert_eq!(scan_literal_strings("(a) x (b c) (d"), vec!["a", "b c"]);
    }
}
