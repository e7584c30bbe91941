//! Sequential generation fallback chain.
//!
//! Exactly one bounded call per backend in declared order; first success
//! wins and no later backend is tried. Sequential on purpose: generation
//! calls are paid, so speculative parallel starts would burn quota for
//! responses that get discarded. Failures are recorded for diagnostics but
//! never surfaced; exhausting the chain yields a fixed degraded reply.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::backend::GenerationBackend;

/// Returned when every backend in the chain has failed.
pub const DEGRADED_REPLY: &str =
    "Sorry, I couldn't reach any of my language models right now. Please try again in a moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    Failure,
}

/// One backend tried during a single chain run. Ephemeral diagnostics.
#[derive(Debug, Clone)]
pub struct GenerationAttempt {
    pub backend_id: String,
    pub order_index: usize,
    pub outcome: AttemptOutcome,
    pub error: Option<String>,
}

/// Terminal result of a chain run: the attempts made and the reply text.
#[derive(Debug, Clone)]
pub struct ChainOutcome {
    pub attempts: Vec<GenerationAttempt>,
    pub text: String,
    /// True when every backend failed and `text` is [`DEGRADED_REPLY`].
    pub degraded: bool,
}

/// Runs the chain over `backends` in declared order. Never fails: total
/// exhaustion degrades to the fixed reply instead of raising.
pub async fn run_chain(
    backends: &[Arc<dyn GenerationBackend>],
    prompt: &str,
    per_call_timeout: Duration,
) -> ChainOutcome {
    let mut attempts = Vec::with_capacity(backends.len());

    for (order_index, backend) in backends.iter().enumerate() {
        let id = backend.id().to_string();
        match timeout(per_call_timeout, backend.generate(prompt)).await {
            Ok(Ok(text)) => {
                tracing::info!(
                    target: "mindmate::fallback",
                    backend = %id,
                    order = order_index,
                    "generation succeeded"
                );
                attempts.push(GenerationAttempt {
                    backend_id: id,
                    order_index,
                    outcome: AttemptOutcome::Success,
                    error: None,
                });
                return ChainOutcome {
                    attempts,
                    text,
                    degraded: false,
                };
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    target: "mindmate::fallback",
                    backend = %id,
                    order = order_index,
                    error = %e,
                    "generation backend failed, trying next"
                );
                attempts.push(GenerationAttempt {
                    backend_id: id,
                    order_index,
                    outcome: AttemptOutcome::Failure,
                    error: Some(e.to_string()),
                });
            }
            Err(_) => {
                tracing::warn!(
                    target: "mindmate::fallback",
                    backend = %id,
                    order = order_index,
                    timeout_ms = per_call_timeout.as_millis() as u64,
                    "generation backend timed out, trying next"
                );
                attempts.push(GenerationAttempt {
                    backend_id: id,
                    order_index,
                    outcome: AttemptOutcome::Failure,
                    error: Some(format!("timed out after {:?}", per_call_timeout)),
                });
            }
        }
    }

    tracing::error!(
        target: "mindmate::fallback",
        tried = attempts.len(),
        "all generation backends exhausted, returning degraded reply"
    );
    ChainOutcome {
        attempts,
        text: DEGRADED_REPLY.to_string(),
        degraded: true,
    }
}
