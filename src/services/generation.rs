use async_trait::async_trait;
use thiserror::Error;

/// Failure categories produced by generation transports. The reply policy
/// layer matches on these kinds instead of inspecting upstream error text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFault {
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("model not found: {0}")]
    ModelNotFound(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("request timed out")]
    Timeout,
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected error: {0}")]
    Unknown(String),
}

/// Parameters for a single chat-completion call.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait TextGenerationBackend: Send + Sync {
    async fn generate_text(
        &self,
        model_id: &str,
        prompt: &str,
    ) -> Result<String, GenerationFault>;
}

#[async_trait]
pub trait ChatCompletionTransport: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<String, GenerationFault>;

    /// Count the models the provider advertises. Diagnostic only.
    async fn list_models(&self, api_key: &str) -> Result<usize, GenerationFault>;
}
