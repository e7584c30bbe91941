//! Canonical label sets and the mapping from backend-specific raw labels.
//!
//! Heterogeneous backends return label strings like `LABEL_1`, `POS`,
//! `nothate`, or plain `toxic`. Every raw label is mapped into exactly one
//! canonical label before aggregation; a raw label with no mapping is a
//! failure for that vote, never a silent coercion.

use serde::Serialize;

/// A fixed canonical label enumeration with a deterministic tie-break order.
pub trait CanonicalLabel: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    /// Tie-break order: earlier entries win ties in aggregation.
    const PRIORITY: &'static [Self];

    /// Maps a backend-specific raw label into this set. `None` = unmapped.
    fn from_raw(raw: &str) -> Option<Self>;

    /// Canonical wire form of the label.
    fn as_str(self) -> &'static str;
}

/// Moderation verdict labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModerationLabel {
    #[serde(rename = "toxic")]
    Toxic,
    #[serde(rename = "not-toxic")]
    NotToxic,
}

impl CanonicalLabel for ModerationLabel {
    const PRIORITY: &'static [Self] = &[ModerationLabel::Toxic, ModerationLabel::NotToxic];

    fn from_raw(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "toxic" | "toxicity" | "hate" | "hateful" | "offensive" | "label_1" | "1" => {
                Some(ModerationLabel::Toxic)
            }
            "not-toxic" | "non-toxic" | "not_toxic" | "nothate" | "non-hateful" | "normal"
            | "neutral" | "label_0" | "0" => Some(ModerationLabel::NotToxic),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ModerationLabel::Toxic => "toxic",
            ModerationLabel::NotToxic => "not-toxic",
        }
    }
}

/// Sentiment verdict labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl CanonicalLabel for SentimentLabel {
    const PRIORITY: &'static [Self] = &[
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    fn from_raw(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "label_1" | "1" | "pos" | "positive" => Some(SentimentLabel::Positive),
            "label_0" | "0" | "neg" | "negative" => Some(SentimentLabel::Negative),
            "label_2" | "2" | "neu" | "neutral" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}
