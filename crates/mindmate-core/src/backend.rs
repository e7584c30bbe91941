//! Backend trait seams: the core talks to classifier and generation
//! backends only through these interfaces, so tests swap in mocks and the
//! HTTP implementations stay in their own modules.

use crate::error::EnsembleResult;

/// One backend's raw classification before canonical label mapping.
#[derive(Debug, Clone)]
pub struct RawClassification {
    pub label: String,
    pub score: f32,
}

/// A third-party text classification backend.
#[async_trait::async_trait]
pub trait ClassifierBackend: Send + Sync {
    /// Stable identifier (model name) used in votes and logs.
    fn id(&self) -> &str;

    /// Classifies the given text. May fail with a transport error,
    /// non-success status, or unparseable body; the fan-out recovers
    /// per backend.
    async fn classify(&self, text: &str) -> EnsembleResult<RawClassification>;
}

/// A third-party text generation backend.
#[async_trait::async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Stable identifier (model name) used in attempts and logs.
    fn id(&self) -> &str;

    /// Generates reply text for the given prompt.
    async fn generate(&self, prompt: &str) -> EnsembleResult<String>;
}
