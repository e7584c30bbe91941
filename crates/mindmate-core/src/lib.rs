//! mindmate-core: ensemble text classification and fallback reply
//! generation for the MindMate companion.
//!
//! Classification fans out to independent hosted classifiers, aggregates
//! their votes with a deterministic tie-break, and can be short-circuited
//! by a fixed emoji rule table. Generation walks an ordered fallback chain
//! of backends, first success wins, degrading to a fixed reply when every
//! backend fails.

mod aggregate;
mod backend;
mod config;
mod context;
mod emoji;
mod error;
mod fallback;
mod fanout;
mod gemini_service;
mod hf_service;
mod labels;
mod normalize;
pub mod prompts;
mod service;

pub use aggregate::{aggregate_moderation, aggregate_sentiment, AggregateVerdict, TOXIC_THRESHOLD};
pub use backend::{ClassifierBackend, GenerationBackend, RawClassification};
pub use config::{
    EnsembleConfig, DEFAULT_GENERATION_MODELS, DEFAULT_MODERATION_MODELS, DEFAULT_SENTIMENT_MODELS,
};
pub use context::{build_prompt, ConversationWindow, Speaker, Turn, WINDOW_CAPACITY};
pub use emoji::{sentiment_verdict, toxic_verdict};
pub use error::{EnsembleError, EnsembleResult};
pub use fallback::{run_chain, AttemptOutcome, ChainOutcome, GenerationAttempt, DEGRADED_REPLY};
pub use fanout::{fan_out, ClassificationVote};
pub use gemini_service::GeminiGenerator;
pub use hf_service::{HfClassifier, HfGenerator};
pub use labels::{CanonicalLabel, ModerationLabel, SentimentLabel};
pub use normalize::normalize;
pub use service::EnsembleService;
