use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::infra::{classify_request_error, upstream_message};
use crate::services::{ChatCompletionTransport, ChatRequest, GenerationFault};

const CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const LIST_MODELS_URL: &str = "https://api.groq.com/openai/v1/models";

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the chat-completion API behind the chat generator.
pub struct HttpGroqTransport {
    http: Client,
}

impl HttpGroqTransport {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ChatCompletionTransport for HttpGroqTransport {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<String, GenerationFault> {
        let body = ChatCompletionBody {
            model: request.model.clone(),
            messages: vec![
                Message {
                    role: "system",
                    content: request.system.clone(),
                },
                Message {
                    role: "user",
                    content: request.prompt.clone(),
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .timeout(COMPLETION_TIMEOUT)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(GenerationFault::Upstream(upstream_message(&body_text)));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| GenerationFault::Unknown(format!("invalid response body: {err}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GenerationFault::Unknown("response contained no choices".to_string()))
    }

    async fn list_models(&self, api_key: &str) -> Result<usize, GenerationFault> {
        let response = self
            .http
            .get(LIST_MODELS_URL)
            .timeout(PROBE_TIMEOUT)
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(GenerationFault::Upstream(upstream_message(&body_text)));
        }

        let parsed: ModelListResponse = response
            .json()
            .await
            .map_err(|err| GenerationFault::Unknown(format!("invalid response body: {err}")))?;

        Ok(parsed.data.len())
    }
}

#[derive(Serialize)]
struct ChatCompletionBody {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ModelListResponse {
    // Only the count matters for the probe.
    #[serde(default)]
    data: Vec<serde_json::Value>,
}
