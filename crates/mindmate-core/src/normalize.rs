//! Text normalization applied before any classification.
//!
//! The emoji rule engine and the backend fan-out must see the same text,
//! so callers normalize exactly once per request.

use unicode_normalization::UnicodeNormalization;

/// Canonicalizes raw text: Unicode NFKC, lowercase, ASCII punctuation
/// stripped, leading/trailing whitespace trimmed. Pure; never fails.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .nfkc()
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    folded.trim().to_string()
}
