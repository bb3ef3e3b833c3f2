//! Canonical text form used before hashing string content.
//!
//! Order matters and is fixed for the current algorithm version:
//! line endings first, then U+FFFD removal, then NFC.

use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

/// Unicode replacement character, left behind by lossy decoding.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Convert `\r\n` and lone `\r` to `\n`. Borrows when there is no `\r`.
pub fn standardize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            // CRLF -> LF, CR -> LF
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Full canonical text form: standardized line endings, no replacement
/// characters, NFC composed.
pub fn normalize_text(text: &str) -> String {
    standardize_line_endings(text)
        .chars()
        .filter(|&c| c != REPLACEMENT_CHAR)
        .nfc()
        .collect()
}

/// Bytes fed to the digest for string content.
pub fn normalize(text: &str) -> Vec<u8> {
    normalize_text(text).into_bytes()
}
