//! Google Gemini generation backend (primary in the fallback chain).

use serde::{Deserialize, Serialize};

use crate::backend::GenerationBackend;
use crate::error::{EnsembleError, EnsembleResult};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

/// Gemini Flash over the `generateContent` REST endpoint. The API key is
/// passed as a query parameter per the Google API convention.
pub struct GeminiGenerator {
    api_key: String,
    url: String,
    client: reqwest::Client,
}

impl GeminiGenerator {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            url: GEMINI_API_URL.to_string(),
            client,
        }
    }

    /// Overrides the endpoint URL (used to point at a different model).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

#[async_trait::async_trait]
impl GenerationBackend for GeminiGenerator {
    fn id(&self) -> &str {
        "gemini-1.5-flash-latest"
    }

    async fn generate(&self, prompt: &str) -> EnsembleResult<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let res = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
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

        let parsed: GenerateContentResponse = res.json().await?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| EnsembleError::Parse("generateContent response had no candidate text".into()))
    }
}
