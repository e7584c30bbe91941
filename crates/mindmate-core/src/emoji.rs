//! Fast-path emoji rule engine: deterministic lookup tables that
//! short-circuit classification before any network call.
//!
//! Scan order is text order; the first matching code point wins. Both
//! tables are fixed at compile time so the same input always produces the
//! same verdict.

use crate::labels::{ModerationLabel, SentimentLabel};

/// Any occurrence of these forces a `(toxic, 1.0)` verdict and skips the
/// backend fan-out entirely (deterministic safety override).
const TOXIC_EMOJI: [char; 4] = ['💩', '🤬', '😡', '😠'];

/// Sentiment emoji with fixed confidences. First occurrence in the text wins.
const SENTIMENT_EMOJI: [(char, SentimentLabel, f32); 15] = [
    ('😊', SentimentLabel::Positive, 1.0),
    ('😀', SentimentLabel::Positive, 1.0),
    ('😃', SentimentLabel::Positive, 1.0),
    ('😄', SentimentLabel::Positive, 1.0),
    ('😍', SentimentLabel::Positive, 1.0),
    ('🥰', SentimentLabel::Positive, 1.0),
    ('😂', SentimentLabel::Positive, 0.8),
    ('😭', SentimentLabel::Negative, 0.8),
    ('😢', SentimentLabel::Negative, 0.8),
    ('😞', SentimentLabel::Negative, 1.0),
    ('😡', SentimentLabel::Negative, 1.0),
    ('😠', SentimentLabel::Negative, 1.0),
    ('😔', SentimentLabel::Negative, 0.8),
    ('😐', SentimentLabel::Neutral, 0.7),
    ('😶', SentimentLabel::Neutral, 0.7),
];

/// Returns `(Toxic, 1.0)` if the normalized text contains any toxic emoji.
pub fn toxic_verdict(text: &str) -> Option<(ModerationLabel, f32)> {
    text.chars()
        .find(|c| TOXIC_EMOJI.contains(c))
        .map(|_| (ModerationLabel::Toxic, 1.0))
}

/// Returns the mapped `(label, confidence)` for the first sentiment emoji
/// occurring in the normalized text, if any.
pub fn sentiment_verdict(text: &str) -> Option<(SentimentLabel, f32)> {
    for c in text.chars() {
        if let Some(&(_, label, score)) = SENTIMENT_EMOJI.iter().find(|(e, _, _)| *e == c) {
            return Some((label, score));
        }
    }
    None
}
