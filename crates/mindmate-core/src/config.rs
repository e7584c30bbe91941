//! Ensemble configuration loaded from the environment.
//!
//! | Env | Default | Description |
//! |-----|---------|-------------|
//! | HF_API_KEY / MINDMATE_HF_API_KEY | unset | Hugging Face Inference API key. |
//! | GEMINI_API_KEY / MINDMATE_GEMINI_API_KEY | unset | Google Gemini key (primary generator). |
//! | MINDMATE_MODERATION_MODELS | built-in list | Comma-separated HF moderation models, fan-out order. |
//! | MINDMATE_SENTIMENT_MODELS | built-in list | Comma-separated HF sentiment models, fan-out order. |
//! | MINDMATE_GENERATION_MODELS | built-in list | Comma-separated HF generation fallbacks, tried in order after Gemini. |
//! | MINDMATE_CLASSIFY_TIMEOUT_SECS | 10 | Per-backend classification timeout. |
//! | MINDMATE_GENERATE_TIMEOUT_SECS | 15 | Per-backend generation timeout. |

use std::time::Duration;

const DEFAULT_CLASSIFY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_GENERATE_TIMEOUT_SECS: u64 = 15;

/// Moderation classifiers queried concurrently, in declared order.
pub const DEFAULT_MODERATION_MODELS: &[&str] = &[
    "unitary/toxic-bert",
    "Hate-speech-CNERG/bert-base-uncased-hate-speech",
    "Hate-speech-CNERG/dehatebert-mono-english",
    "cointegrated/rubert-toxic-pikabu",
];

/// Sentiment classifiers queried concurrently, in declared order.
pub const DEFAULT_SENTIMENT_MODELS: &[&str] = &[
    "distilroberta-base",
    "cardiffnlp/twitter-roberta-base-sentiment",
    "finiteautomata/bertweet-base-sentiment-analysis",
];

/// Secondary generation backends, tried sequentially after Gemini.
pub const DEFAULT_GENERATION_MODELS: &[&str] = &[
    "tiiuae/falcon-7b-instruct",
    "facebook/blenderbot-3B",
    "gpt2",
];

/// Static configuration for the ensemble service. The backend order here
/// is the declared order everywhere downstream; it is never re-derived per
/// call.
#[derive(Debug, Clone)]
pub struct EnsembleConfig {
    pub hf_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub moderation_models: Vec<String>,
    pub sentiment_models: Vec<String>,
    pub generation_models: Vec<String>,
    pub classify_timeout: Duration,
    pub generate_timeout: Duration,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            hf_api_key: None,
            gemini_api_key: None,
            moderation_models: to_owned(DEFAULT_MODERATION_MODELS),
            sentiment_models: to_owned(DEFAULT_SENTIMENT_MODELS),
            generation_models: to_owned(DEFAULT_GENERATION_MODELS),
            classify_timeout: Duration::from_secs(DEFAULT_CLASSIFY_TIMEOUT_SECS),
            generate_timeout: Duration::from_secs(DEFAULT_GENERATE_TIMEOUT_SECS),
        }
    }
}

impl EnsembleConfig {
    /// Loads config from environment. Unset or invalid => defaults.
    pub fn from_env() -> Self {
        Self {
            hf_api_key: env_opt("MINDMATE_HF_API_KEY").or_else(|| env_opt("HF_API_KEY")),
            gemini_api_key: env_opt("MINDMATE_GEMINI_API_KEY").or_else(|| env_opt("GEMINI_API_KEY")),
            moderation_models: env_list("MINDMATE_MODERATION_MODELS", DEFAULT_MODERATION_MODELS),
            sentiment_models: env_list("MINDMATE_SENTIMENT_MODELS", DEFAULT_SENTIMENT_MODELS),
            generation_models: env_list("MINDMATE_GENERATION_MODELS", DEFAULT_GENERATION_MODELS),
            classify_timeout: Duration::from_secs(env_secs(
                "MINDMATE_CLASSIFY_TIMEOUT_SECS",
                DEFAULT_CLASSIFY_TIMEOUT_SECS,
            )),
            generate_timeout: Duration::from_secs(env_secs(
                "MINDMATE_GENERATE_TIMEOUT_SECS",
                DEFAULT_GENERATE_TIMEOUT_SECS,
            )),
        }
    }
}

fn to_owned(models: &[&str]) -> Vec<String> {
    models.iter().map(|m| m.to_string()).collect()
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_list(key: &str, default: &[&str]) -> Vec<String> {
    match env_opt(key) {
        Some(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => to_owned(default),
    }
}

fn env_secs(key: &str, default: u64) -> u64 {
    env_opt(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
