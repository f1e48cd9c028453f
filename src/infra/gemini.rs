use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::infra::{classify_request_error, upstream_message};
use crate::services::{GenerationFault, TextGenerationBackend};

const GENERATION_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for the generative-text API behind the tiered generator.
pub struct HttpGeminiBackend {
    http: Client,
    api_key: Option<String>,
}

impl HttpGeminiBackend {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_key,
        }
    }

    fn endpoint(model_id: &str) -> String {
        format!("{GENERATION_BASE_URL}/models/{model_id}:generateContent")
    }
}

#[async_trait]
impl TextGenerationBackend for HttpGeminiBackend {
    async fn generate_text(
        &self,
        model_id: &str,
        prompt: &str,
    ) -> Result<String, GenerationFault> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GenerationFault::Unauthorized("Gemini API key not configured".to_string())
        })?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(Self::endpoint(model_id))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GenerationFault::Unknown(format!("invalid response body: {err}")))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| GenerationFault::Unknown("response contained no candidates".to_string()))
    }
}

fn classify_status(status: StatusCode, body: &str) -> GenerationFault {
    let message = upstream_message(body);
    match status {
        StatusCode::TOO_MANY_REQUESTS => GenerationFault::RateLimited(message),
        StatusCode::NOT_FOUND => GenerationFault::ModelNotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationFault::Unauthorized(message),
        _ => GenerationFault::Upstream(message),
    }
}

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
