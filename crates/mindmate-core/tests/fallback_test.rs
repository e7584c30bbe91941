//! Generation fallback chain tests: strict declared order, first success
//! wins, and total exhaustion degrades instead of raising.
//!
//! Run with: `cargo test --test fallback_test`

use std::sync::{Arc, Mutex};
use std::time::Duration;

use mindmate_core::{
    run_chain, AttemptOutcome, ConversationWindow, EnsembleError, EnsembleService,
    GenerationBackend, Speaker, DEGRADED_REPLY,
};

/// Scripted generator that records every call into a shared log.
struct MockGenerator {
    id: String,
    behavior: Behavior,
    log: Arc<Mutex<Vec<String>>>,
}

enum Behavior {
    Respond(&'static str),
    Fail,
    Hang,
}

impl MockGenerator {
    fn new(id: &str, behavior: Behavior, log: &Arc<Mutex<Vec<String>>>) -> Arc<dyn GenerationBackend> {
        Arc::new(Self {
            id: id.to_string(),
            behavior,
            log: Arc::clone(log),
        })
    }
}

#[async_trait::async_trait]
impl GenerationBackend for MockGenerator {
    fn id(&self) -> &str {
        &self.id
    }

    async fn generate(&self, _prompt: &str) -> mindmate_core::EnsembleResult<String> {
        self.log.lock().unwrap().push(self.id.clone());
        match self.behavior {
            Behavior::Respond(text) => Ok(text.to_string()),
            Behavior::Fail => Err(EnsembleError::Status {
                status: 503,
                body: "overloaded".into(),
            }),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                unreachable!("chain timeout should have fired first")
            }
        }
    }
}

#[tokio::test]
async fn first_success_stops_the_chain() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let backends = vec![
        MockGenerator::new("primary", Behavior::Fail, &log),
        MockGenerator::new("secondary-0", Behavior::Fail, &log),
        MockGenerator::new("secondary-1", Behavior::Respond("here for you"), &log),
        MockGenerator::new("secondary-2", Behavior::Respond("never reached"), &log),
    ];

    let outcome = run_chain(&backends, "prompt", Duration::from_millis(100)).await;
    assert_eq!(outcome.text, "here for you");
    assert!(!outcome.degraded);
    // Strict declared order, and nothing after the first success.
    assert_eq!(
        *log.lock().unwrap(),
        ["primary", "secondary-0", "secondary-1"]
    );
    assert_eq!(outcome.attempts.len(), 3);
    assert_eq!(outcome.attempts[2].outcome, AttemptOutcome::Success);
    assert_eq!(outcome.attempts[2].order_index, 2);
}

#[tokio::test]
async fn primary_success_tries_nothing_else() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let backends = vec![
        MockGenerator::new("primary", Behavior::Respond("hello!"), &log),
        MockGenerator::new("secondary-0", Behavior::Respond("unused"), &log),
    ];

    let outcome = run_chain(&backends, "prompt", Duration::from_millis(100)).await;
    assert_eq!(outcome.text, "hello!");
    assert_eq!(*log.lock().unwrap(), ["primary"]);
}

#[tokio::test]
async fn exhaustion_returns_degraded_reply_without_raising() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let backends = vec![
        MockGenerator::new("primary", Behavior::Fail, &log),
        MockGenerator::new("secondary-0", Behavior::Hang, &log),
        MockGenerator::new("secondary-1", Behavior::Fail, &log),
    ];

    let outcome = run_chain(&backends, "prompt", Duration::from_millis(50)).await;
    assert!(outcome.degraded);
    assert_eq!(outcome.text, DEGRADED_REPLY);
    assert_eq!(outcome.attempts.len(), 3);
    assert!(outcome
        .attempts
        .iter()
        .all(|a| a.outcome == AttemptOutcome::Failure));
    // Each backend was tried exactly once.
    assert_eq!(*log.lock().unwrap(), ["primary", "secondary-0", "secondary-1"]);
}

#[tokio::test]
async fn empty_chain_degrades_immediately() {
    let outcome = run_chain(&[], "prompt", Duration::from_millis(50)).await;
    assert!(outcome.degraded);
    assert_eq!(outcome.text, DEGRADED_REPLY);
    assert!(outcome.attempts.is_empty());
}

#[tokio::test]
async fn service_reply_uses_chain_and_validates_input() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let backends = vec![MockGenerator::new("primary", Behavior::Respond("you're not alone"), &log)];
    let service = EnsembleService::new(
        Vec::new(),
        Vec::new(),
        backends,
        Duration::from_millis(100),
        Duration::from_millis(100),
    );

    let empty = ConversationWindow::new();
    let err = service.reply(&empty).await.unwrap_err();
    assert!(matches!(err, EnsembleError::EmptyInput));
    assert!(log.lock().unwrap().is_empty(), "no backend call on empty window");

    let mut window = ConversationWindow::new();
    window.push(Speaker::User, "I can't sleep before exams");
    let reply = service.reply(&window).await.expect("reply");
    assert_eq!(reply, "you're not alone");
    assert_eq!(*log.lock().unwrap(), ["primary"]);
}
