//! Voting aggregator: combines the fan-out's vote set into one verdict.
//!
//! Failed votes are discarded before weighting and never count toward the
//! denominator. Ties are broken by the label set's fixed priority order so
//! a given vote set always produces the same verdict.

use serde::Serialize;

use crate::fanout::ClassificationVote;
use crate::labels::{CanonicalLabel, ModerationLabel, SentimentLabel};

/// A moderation vote counts toward `Toxic` only at or above this
/// confidence; below it the score is folded into the `NotToxic` bucket.
pub const TOXIC_THRESHOLD: f32 = 0.7;

/// Final combined verdict for one classification call.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AggregateVerdict<L> {
    pub label: L,
    /// Winning weight divided by the number of successful votes; in [0, 1].
    pub score: f32,
    /// Successful backends only; failures are excluded, not counted as zero.
    pub contributing_votes: usize,
}

impl<L: CanonicalLabel> AggregateVerdict<L> {
    /// Verdict from the emoji fast path: fixed confidence, no backend votes.
    pub fn rule_based(label: L, score: f32) -> Self {
        Self {
            label,
            score,
            contributing_votes: 0,
        }
    }
}

/// Picks the label with the greatest weight; iterating in priority order
/// with a strict comparison means earlier labels win exact ties.
fn pick_winner<L: CanonicalLabel>(weight_of: impl Fn(L) -> f32) -> (L, f32) {
    let mut best: Option<(L, f32)> = None;
    for &label in L::PRIORITY {
        let w = weight_of(label);
        if best.map_or(true, |(_, bw)| w > bw) {
            best = Some((label, w));
        }
    }
    // PRIORITY is a non-empty const table.
    best.unwrap_or((L::PRIORITY[0], 0.0))
}

/// Aggregates moderation votes with the conservative threshold rule: a
/// vote's score counts toward `Toxic` only if its label is `Toxic` and its
/// score is at least [`TOXIC_THRESHOLD`]; every other successful vote's
/// score is added to `NotToxic` regardless of the backend's own label.
/// Zero successful votes fails open to `(not-toxic, 0.0)`.
pub fn aggregate_moderation(
    votes: &[ClassificationVote<ModerationLabel>],
) -> AggregateVerdict<ModerationLabel> {
    let mut toxic = 0.0f32;
    let mut not_toxic = 0.0f32;
    let mut successes = 0usize;

    for vote in votes {
        let Some(label) = vote.label.filter(|_| vote.success) else {
            continue;
        };
        successes += 1;
        if label == ModerationLabel::Toxic && vote.score >= TOXIC_THRESHOLD {
            toxic += vote.score;
        } else {
            not_toxic += vote.score;
        }
    }

    if successes == 0 {
        return AggregateVerdict {
            label: ModerationLabel::NotToxic,
            score: 0.0,
            contributing_votes: 0,
        };
    }

    let (label, weight) = pick_winner(|l| match l {
        ModerationLabel::Toxic => toxic,
        ModerationLabel::NotToxic => not_toxic,
    });
    AggregateVerdict {
        label,
        score: weight / successes as f32,
        contributing_votes: successes,
    }
}

/// Aggregates sentiment votes: each successful vote's score is added to
/// its own label's weight, no threshold. Zero successful votes defaults to
/// `(neutral, 0.0)`.
pub fn aggregate_sentiment(
    votes: &[ClassificationVote<SentimentLabel>],
) -> AggregateVerdict<SentimentLabel> {
    let mut positive = 0.0f32;
    let mut negative = 0.0f32;
    let mut neutral = 0.0f32;
    let mut successes = 0usize;

    for vote in votes {
        let Some(label) = vote.label.filter(|_| vote.success) else {
            continue;
        };
        successes += 1;
        match label {
            SentimentLabel::Positive => positive += vote.score,
            SentimentLabel::Negative => negative += vote.score,
            SentimentLabel::Neutral => neutral += vote.score,
        }
    }

    if successes == 0 {
        return AggregateVerdict {
            label: SentimentLabel::Neutral,
            score: 0.0,
            contributing_votes: 0,
        };
    }

    let (label, weight) = pick_winner(|l| match l {
        SentimentLabel::Positive => positive,
        SentimentLabel::Negative => negative,
        SentimentLabel::Neutral => neutral,
    });
    AggregateVerdict {
        label,
        score: weight / successes as f32,
        contributing_votes: successes,
    }
}
