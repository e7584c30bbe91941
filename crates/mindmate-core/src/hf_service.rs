//! Hugging Face Inference API backends: hosted classifiers for the
//! moderation/sentiment fan-out and hosted text-generation models for the
//! fallback chain.
//!
//! Both speak the same `POST {"inputs": ...}` protocol with bearer auth;
//! only the response shapes differ. The shared `reqwest::Client` is handed
//! in by the caller so the connection pool is reused across backends.

use serde::{Deserialize, Serialize};

use crate::backend::{ClassifierBackend, GenerationBackend, RawClassification};
use crate::error::{EnsembleError, EnsembleResult};

const HF_API_BASE: &str = "https://api-inference.huggingface.co/models";

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize, Debug)]
struct LabelScore {
    label: String,
    #[serde(default)]
    score: f32,
}

/// Classification responses arrive either as `[{label, score}, ...]` or
/// nested one level deeper as `[[{label, score}, ...]]`, best score first.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassifyResponse {
    fn into_top(self) -> Option<LabelScore> {
        match self {
            ClassifyResponse::Flat(v) => v.into_iter().next(),
            ClassifyResponse::Nested(vv) => vv.into_iter().next().and_then(|v| v.into_iter().next()),
        }
    }
}

#[derive(Deserialize, Debug)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum GenerateResponse {
    Many(Vec<GeneratedText>),
    Single(GeneratedText),
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        match self {
            GenerateResponse::Single(g) => Some(g.generated_text),
            GenerateResponse::Many(v) => v.into_iter().next().map(|g| g.generated_text),
        }
    }
}

async fn post_inference(
    client: &reqwest::Client,
    model: &str,
    api_key: &str,
    inputs: &str,
) -> EnsembleResult<reqwest::Response> {
    let url = format!("{}/{}", HF_API_BASE, model);
    let res = client
        .post(&url)
        .header("Authorization", format!("Bearer {}", api_key))
        .json(&InferenceRequest { inputs })
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(EnsembleError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(res)
}

/// A hosted classification model on the Hugging Face Inference API.
pub struct HfClassifier {
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl HfClassifier {
    pub fn new(client: reqwest::Client, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl ClassifierBackend for HfClassifier {
    fn id(&self) -> &str {
        &self.model
    }

    async fn classify(&self, text: &str) -> EnsembleResult<RawClassification> {
        let res = post_inference(&self.client, &self.model, &self.api_key, text).await?;
        let parsed: ClassifyResponse = res.json().await?;
        let top = parsed
            .into_top()
            .ok_or_else(|| EnsembleError::Parse("classification response had no entries".into()))?;
        Ok(RawClassification {
            label: top.label,
            score: top.score,
        })
    }
}

/// A hosted text-generation model on the Hugging Face Inference API.
pub struct HfGenerator {
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl HfGenerator {
    pub fn new(client: reqwest::Client, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl GenerationBackend for HfGenerator {
    fn id(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> EnsembleResult<String> {
        let res = post_inference(&self.client, &self.model, &self.api_key, prompt).await?;
        let parsed: GenerateResponse = res.json().await?;
        parsed
            .into_text()
            .ok_or_else(|| EnsembleError::Parse("generation response missing generated_text".into()))
    }
}
