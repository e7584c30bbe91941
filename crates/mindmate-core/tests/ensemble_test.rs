//! Ensemble classification tests: emoji short-circuit, fan-out isolation,
//! and fail-open defaults, exercised through the public service with mock
//! backends.
//!
//! Run with: `cargo test --test ensemble_test`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mindmate_core::{
    ClassifierBackend, EnsembleError, EnsembleService, ModerationLabel, RawClassification,
    SentimentLabel,
};

/// Scripted classifier: returns a fixed raw result, an error, or hangs
/// past the fan-out timeout. Counts how often it was called.
struct MockClassifier {
    id: String,
    behavior: Behavior,
    calls: Arc<AtomicUsize>,
}

enum Behavior {
    Respond { label: &'static str, score: f32 },
    Fail,
    Hang,
}

impl MockClassifier {
    fn new(id: &str, behavior: Behavior) -> (Arc<dyn ClassifierBackend>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mock: Arc<dyn ClassifierBackend> = Arc::new(Self {
            id: id.to_string(),
            behavior,
            calls: Arc::clone(&calls),
        });
        (mock, calls)
    }
}

#[async_trait::async_trait]
impl ClassifierBackend for MockClassifier {
    fn id(&self) -> &str {
        &self.id
    }

    async fn classify(&self, _text: &str) -> mindmate_core::EnsembleResult<RawClassification> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Respond { label, score } => Ok(RawClassification {
                label: label.to_string(),
                score,
            }),
            Behavior::Fail => Err(EnsembleError::Transport("connection refused".into())),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                unreachable!("fan-out timeout should have fired first")
            }
        }
    }
}

fn service_with(
    moderation: Vec<Arc<dyn ClassifierBackend>>,
    sentiment: Vec<Arc<dyn ClassifierBackend>>,
) -> EnsembleService {
    EnsembleService::new(
        moderation,
        sentiment,
        Vec::new(),
        Duration::from_millis(100),
        Duration::from_millis(100),
    )
}

#[tokio::test]
async fn toxic_emoji_skips_all_backends() {
    let (backend, calls) = MockClassifier::new("toxic-model", Behavior::Respond { label: "not-toxic", score: 0.9 });
    let service = service_with(vec![backend], Vec::new());

    let verdict = service.moderate("you are 💩").await.expect("moderate");
    assert_eq!(verdict.label, ModerationLabel::Toxic);
    assert_eq!(verdict.score, 1.0);
    assert_eq!(calls.load(Ordering::SeqCst), 0, "no backend call may be issued");
}

#[tokio::test]
async fn sentiment_emoji_skips_all_backends() {
    let (backend, calls) = MockClassifier::new("sent-model", Behavior::Respond { label: "NEG", score: 0.9 });
    let service = service_with(Vec::new(), vec![backend]);

    let verdict = service.mood("today was great 😊").await.expect("mood");
    assert_eq!(verdict.label, SentimentLabel::Positive);
    assert_eq!(verdict.score, 1.0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn one_failing_backend_does_not_block_the_others() {
    let (good, _) = MockClassifier::new("good", Behavior::Respond { label: "toxic", score: 0.9 });
    let (bad, bad_calls) = MockClassifier::new("bad", Behavior::Fail);
    let (slow, slow_calls) = MockClassifier::new("slow", Behavior::Hang);
    let service = service_with(vec![good, bad, slow], Vec::new());

    let verdict = service.moderate("some message").await.expect("moderate");
    // Only the good backend contributes; failure and timeout are excluded
    // from the denominator.
    assert_eq!(verdict.label, ModerationLabel::Toxic);
    assert!((verdict.score - 0.9).abs() < 1e-6);
    assert_eq!(verdict.contributing_votes, 1);
    assert_eq!(bad_calls.load(Ordering::SeqCst), 1);
    assert_eq!(slow_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unmapped_label_fails_that_vote_only() {
    let (odd, _) = MockClassifier::new("odd", Behavior::Respond { label: "LABEL_9", score: 0.99 });
    let (neg, _) = MockClassifier::new("neg", Behavior::Respond { label: "LABEL_0", score: 0.6 });
    let service = service_with(Vec::new(), vec![odd, neg]);

    let verdict = service.mood("meh, whatever").await.expect("mood");
    assert_eq!(verdict.label, SentimentLabel::Negative);
    assert_eq!(verdict.contributing_votes, 1);
    assert!((verdict.score - 0.6).abs() < 1e-6);
}

#[tokio::test]
async fn zero_successful_backends_fail_open() {
    let (a, _) = MockClassifier::new("a", Behavior::Fail);
    let (b, _) = MockClassifier::new("b", Behavior::Hang);
    let service = service_with(vec![Arc::clone(&a), Arc::clone(&b)], vec![a, b]);

    let moderation = service.moderate("hello there").await.expect("moderate");
    assert_eq!(moderation.label, ModerationLabel::NotToxic);
    assert_eq!(moderation.score, 0.0);
    assert_eq!(moderation.contributing_votes, 0);

    let mood = service.mood("hello there").await.expect("mood");
    assert_eq!(mood.label, SentimentLabel::Neutral);
    assert_eq!(mood.score, 0.0);
}

#[tokio::test]
async fn repeated_runs_are_deterministic() {
    let make = || {
        let (a, _) = MockClassifier::new("a", Behavior::Respond { label: "positive", score: 0.5 });
        let (b, _) = MockClassifier::new("b", Behavior::Respond { label: "negative", score: 0.5 });
        service_with(Vec::new(), vec![a, b])
    };
    for _ in 0..5 {
        let verdict = make().mood("mixed feelings today").await.expect("mood");
        assert_eq!(verdict.label, SentimentLabel::Positive, "tie must break by priority");
    }
}

#[tokio::test]
async fn empty_input_is_rejected_before_any_backend_call() {
    let (backend, calls) = MockClassifier::new("m", Behavior::Respond { label: "toxic", score: 0.9 });
    let service = service_with(vec![backend], Vec::new());

    let err = service.moderate("  !!! ").await.unwrap_err();
    assert!(matches!(err, EnsembleError::EmptyInput));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
