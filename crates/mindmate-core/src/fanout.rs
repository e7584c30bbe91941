//! Concurrent classifier fan-out.
//!
//! One query per backend, each bounded by its own timeout, joined at a
//! single barrier. A backend's failure (timeout, transport, bad status,
//! unparseable body, unmapped label) produces a failed vote and never
//! delays or aborts its siblings. No retries: one attempt per backend per
//! call.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::time::timeout;

use crate::backend::ClassifierBackend;
use crate::labels::CanonicalLabel;

/// One backend's contribution to a classification call. Request-scoped;
/// consumed by the aggregator and then discarded.
#[derive(Debug, Clone)]
pub struct ClassificationVote<L> {
    pub backend_id: String,
    /// Canonical label; `None` when the backend failed.
    pub label: Option<L>,
    /// Raw confidence in [0, 1]; 0.0 when the backend failed.
    pub score: f32,
    pub success: bool,
}

impl<L> ClassificationVote<L> {
    fn failed(backend_id: String) -> Self {
        Self {
            backend_id,
            label: None,
            score: 0.0,
            success: false,
        }
    }
}

/// Queries every backend concurrently and returns all votes, failed ones
/// included (the aggregator filters). Completes once every backend has
/// responded or timed out; ordering of the result is the backend order but
/// carries no meaning, as aggregation is commutative.
pub async fn fan_out<L: CanonicalLabel>(
    backends: &[Arc<dyn ClassifierBackend>],
    text: &str,
    per_call_timeout: Duration,
) -> Vec<ClassificationVote<L>> {
    let calls = backends.iter().map(|backend| {
        let backend = Arc::clone(backend);
        let text = text.to_string();
        async move {
            let id = backend.id().to_string();
            match timeout(per_call_timeout, backend.classify(&text)).await {
                Err(_) => {
                    tracing::warn!(
                        target: "mindmate::fanout",
                        backend = %id,
                        timeout_ms = per_call_timeout.as_millis() as u64,
                        "classifier backend timed out"
                    );
                    ClassificationVote::failed(id)
                }
                Ok(Err(e)) => {
                    tracing::warn!(target: "mindmate::fanout", backend = %id, error = %e, "classifier backend failed");
                    ClassificationVote::failed(id)
                }
                Ok(Ok(raw)) => match L::from_raw(&raw.label) {
                    Some(label) => ClassificationVote {
                        backend_id: id,
                        label: Some(label),
                        score: raw.score.clamp(0.0, 1.0),
                        success: true,
                    },
                    None => {
                        tracing::warn!(
                            target: "mindmate::fanout",
                            backend = %id,
                            raw_label = %raw.label,
                            "classifier returned an unmapped label"
                        );
                        ClassificationVote::failed(id)
                    }
                },
            }
        }
    });
    join_all(calls).await
}
