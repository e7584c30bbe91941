//! The two public entry points: classification (moderation/sentiment) and
//! reply generation. Everything upstream of the HTTP layer lives behind
//! this facade.

use std::sync::Arc;
use std::time::Duration;

use crate::aggregate::{aggregate_moderation, aggregate_sentiment, AggregateVerdict};
use crate::backend::{ClassifierBackend, GenerationBackend};
use crate::config::EnsembleConfig;
use crate::context::{build_prompt, ConversationWindow};
use crate::emoji;
use crate::error::{EnsembleError, EnsembleResult};
use crate::fallback::run_chain;
use crate::fanout::fan_out;
use crate::gemini_service::GeminiGenerator;
use crate::hf_service::{HfClassifier, HfGenerator};
use crate::labels::{ModerationLabel, SentimentLabel};
use crate::normalize::normalize;

/// Request-scoped orchestration over the configured backends. Holds no
/// per-request state; cheap to share behind an `Arc`.
pub struct EnsembleService {
    moderation: Vec<Arc<dyn ClassifierBackend>>,
    sentiment: Vec<Arc<dyn ClassifierBackend>>,
    generation: Vec<Arc<dyn GenerationBackend>>,
    classify_timeout: Duration,
    generate_timeout: Duration,
}

impl EnsembleService {
    /// Wires up HTTP backends from config. Backends whose API key is
    /// missing are left out: classification then fails open to its default
    /// verdict and generation degrades, but the service stays up.
    pub fn from_config(client: &reqwest::Client, config: &EnsembleConfig) -> Self {
        let mut moderation: Vec<Arc<dyn ClassifierBackend>> = Vec::new();
        let mut sentiment: Vec<Arc<dyn ClassifierBackend>> = Vec::new();
        let mut generation: Vec<Arc<dyn GenerationBackend>> = Vec::new();

        match &config.gemini_api_key {
            Some(key) => {
                generation.push(Arc::new(GeminiGenerator::new(client.clone(), key.clone())));
            }
            None => {
                tracing::warn!(target: "mindmate::service", "Gemini API key not configured; primary generator disabled");
            }
        }

        match &config.hf_api_key {
            Some(key) => {
                for model in &config.moderation_models {
                    moderation.push(Arc::new(HfClassifier::new(client.clone(), model.clone(), key.clone())));
                }
                for model in &config.sentiment_models {
                    sentiment.push(Arc::new(HfClassifier::new(client.clone(), model.clone(), key.clone())));
                }
                for model in &config.generation_models {
                    generation.push(Arc::new(HfGenerator::new(client.clone(), model.clone(), key.clone())));
                }
            }
            None => {
                tracing::warn!(target: "mindmate::service", "Hugging Face API key not configured; classifier ensemble and generation fallbacks disabled");
            }
        }

        Self {
            moderation,
            sentiment,
            generation,
            classify_timeout: config.classify_timeout,
            generate_timeout: config.generate_timeout,
        }
    }

    /// Wires up explicit backends; used by tests and embedders.
    pub fn new(
        moderation: Vec<Arc<dyn ClassifierBackend>>,
        sentiment: Vec<Arc<dyn ClassifierBackend>>,
        generation: Vec<Arc<dyn GenerationBackend>>,
        classify_timeout: Duration,
        generate_timeout: Duration,
    ) -> Self {
        Self {
            moderation,
            sentiment,
            generation,
            classify_timeout,
            generate_timeout,
        }
    }

    /// Validates and normalizes input text shared by both classifiers.
    fn clean_input(text: &str) -> EnsembleResult<String> {
        let clean = normalize(text);
        if clean.is_empty() {
            return Err(EnsembleError::EmptyInput);
        }
        Ok(clean)
    }

    /// Classifies text as toxic / not-toxic. The emoji rule engine may
    /// short-circuit before any backend is queried. Never fails on backend
    /// unavailability; only on empty input.
    pub async fn moderate(&self, text: &str) -> EnsembleResult<AggregateVerdict<ModerationLabel>> {
        let clean = Self::clean_input(text)?;

        if let Some((label, score)) = emoji::toxic_verdict(&clean) {
            tracing::debug!(target: "mindmate::service", "moderation short-circuited by emoji rule");
            return Ok(AggregateVerdict::rule_based(label, score));
        }

        let votes = fan_out(&self.moderation, &clean, self.classify_timeout).await;
        Ok(aggregate_moderation(&votes))
    }

    /// Classifies text sentiment (positive / negative / neutral). Same
    /// short-circuit and failure semantics as [`moderate`](Self::moderate).
    pub async fn mood(&self, text: &str) -> EnsembleResult<AggregateVerdict<SentimentLabel>> {
        let clean = Self::clean_input(text)?;

        if let Some((label, score)) = emoji::sentiment_verdict(&clean) {
            tracing::debug!(target: "mindmate::service", "sentiment short-circuited by emoji rule");
            return Ok(AggregateVerdict::rule_based(label, score));
        }

        let votes = fan_out(&self.sentiment, &clean, self.classify_timeout).await;
        Ok(aggregate_sentiment(&votes))
    }

    /// Generates a reply for the conversation window via the fallback
    /// chain. Fails only on an empty window; backend exhaustion returns
    /// the fixed degraded reply instead.
    pub async fn reply(&self, window: &ConversationWindow) -> EnsembleResult<String> {
        if window.turns().all(|t| t.text.trim().is_empty()) {
            return Err(EnsembleError::EmptyInput);
        }

        let prompt = build_prompt(window);
        let outcome = run_chain(&self.generation, &prompt, self.generate_timeout).await;
        Ok(outcome.text)
    }
}
