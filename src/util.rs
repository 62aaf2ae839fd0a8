//! Utility functions shared across the crate.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from document metadata)
/// 3. Falls back to Windows-1252 (common in old ebooks)
///
/// Returns the decoded string together with the name of the encoding that was
/// actually used, so callers can record it in book metadata. Uses `Cow<str>`
/// to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> (Cow<'a, str>, &'static str) {
    // Try UTF-8 first (handles BOM automatically)
    let (result, encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return (result, encoding.name());
    }

    // If UTF-8 failed, try the hint encoding
    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, used, _) = encoding.decode(bytes);
        return (result, used.name());
    }

    // Fallback: Windows-1252 (common in old ebooks, superset of ISO-8859-1)
    let (result, used, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    (result, used.name())
}
