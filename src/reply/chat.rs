use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ticket::TicketFields;
use crate::prompt::support_reply_prompt;
use crate::services::{ChatCompletionTransport, ChatRequest, GenerationFault};

pub const CHAT_MODEL_ID: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

/// Hard ceiling on a returned reply, stated in the prompt and enforced
/// again after the call.
pub const REPLY_CHAR_LIMIT: usize = 255;
const TRUNCATED_CHARS: usize = 247;
const ELLIPSIS: &str = "...";

const MAX_COMPLETION_TOKENS: u32 = 150;
const SAMPLING_TEMPERATURE: f32 = 0.7;
const SYSTEM_PERSONA: &str = "You are a helpful customer support assistant. \
     Provide concise, professional responses that solve customer problems efficiently.";

pub const KEY_NOT_CONFIGURED_MESSAGE: &str =
    "Groq API key not configured. Please set GROQ_API_KEY in environment variables.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error occurred while connecting to the Groq API.";
pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred while generating the AI response.";

/// Single-model chat-completion reply generator. The API key is injected at
/// construction; a missing key short-circuits before any transport call.
pub struct ChatReplyGenerator {
    transport: Arc<dyn ChatCompletionTransport>,
    api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub reachable: bool,
    pub model_count: usize,
}

impl ChatReplyGenerator {
    pub fn new(transport: Arc<dyn ChatCompletionTransport>, api_key: Option<String>) -> Self {
        Self { transport, api_key }
    }

    /// Draft a reply for the ticket. Never returns an error: failures map to
    /// displayable text, and oversized replies are truncated to the budget.
    pub async fn suggest(&self, ticket: &TicketFields) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return KEY_NOT_CONFIGURED_MESSAGE.to_string();
        };

        let request = ChatRequest {
            model: CHAT_MODEL_ID.to_string(),
            system: SYSTEM_PERSONA.to_string(),
            prompt: support_reply_prompt(&ticket.subject, &ticket.message, REPLY_CHAR_LIMIT),
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: SAMPLING_TEMPERATURE,
        };

        match self.transport.complete(api_key, &request).await {
            Ok(content) => {
                debug!(response_chars = content.chars().count(), "generated reply");
                enforce_reply_limit(content.trim())
            }
            Err(GenerationFault::Upstream(message)) => {
                warn!(%message, "chat completion rejected");
                format!("API Error: {message}")
            }
            Err(fault @ (GenerationFault::Network(_) | GenerationFault::Timeout)) => {
                warn!(%fault, "chat provider unreachable");
                NETWORK_ERROR_MESSAGE.to_string()
            }
            Err(fault) => {
                warn!(%fault, "chat completion failed");
                UNEXPECTED_ERROR_MESSAGE.to_string()
            }
        }
    }

    /// Connectivity check against the provider's model listing. Diagnostic
    /// only, never on the reply path.
    pub async fn probe(&self) -> ProbeOutcome {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("probe skipped: API key not configured");
            return ProbeOutcome {
                reachable: false,
                model_count: 0,
            };
        };

        match self.transport.list_models(api_key).await {
            Ok(model_count) => ProbeOutcome {
                reachable: true,
                model_count,
            },
            Err(fault) => {
                warn!(%fault, "probe failed");
                ProbeOutcome {
                    reachable: false,
                    model_count: 0,
                }
            }
        }
    }
}

fn enforce_reply_limit(text: &str) -> String {
    if text.chars().count() > REPLY_CHAR_LIMIT {
        let mut clipped: String = text.chars().take(TRUNCATED_CHARS).collect();
        clipped.push_str(ELLIPSIS);
        clipped
    } else {
        text.to_string()
    }
}
