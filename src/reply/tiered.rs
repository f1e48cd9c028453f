use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::domain::model::ModelTier;
use crate::domain::ticket::TicketFields;
use crate::prompt::support_reply_prompt;
use crate::services::{GenerationFault, TextGenerationBackend};

/// The requested tier plus at most one downgrade.
const MAX_ATTEMPTS: usize = 2;

pub const QUOTA_EXCEEDED_MESSAGE: &str = "The AI response generation limit has been exceeded. \
     Please try again later or check your API usage.";
pub const MODEL_UNAVAILABLE_MESSAGE: &str =
    "The AI model is currently unavailable. Please try again later.";
pub const GENERATION_FAILED_MESSAGE: &str =
    "An error occurred while generating the AI response. Please try again.";

/// Flash/pro reply generator. Picks the model and character budget from the
/// tier table, falls back to flash once when the requested model is missing,
/// and converts every failure into a fixed displayable message.
pub struct TieredReplyGenerator {
    backend: Arc<dyn TextGenerationBackend>,
}

#[derive(Debug, Clone)]
pub struct ModelRun {
    pub response: String,
    pub elapsed: Duration,
    pub length: usize,
}

#[derive(Debug, Clone)]
pub struct ModelComparison {
    pub pro: ModelRun,
    pub flash: ModelRun,
    /// Pro minus flash, in seconds. Negative when flash was slower.
    pub time_difference: f64,
    /// Pro over flash; positive infinity when the flash run took zero time.
    pub time_ratio: f64,
}

impl TieredReplyGenerator {
    pub fn new(backend: Arc<dyn TextGenerationBackend>) -> Self {
        Self { backend }
    }

    /// Draft a reply for the ticket. Never returns an error: failures map to
    /// fixed fallback messages so callers always get displayable text.
    pub async fn suggest(&self, ticket: &TicketFields, tier: ModelTier) -> String {
        let mut tier = tier;

        for _ in 0..MAX_ATTEMPTS {
            let prompt =
                support_reply_prompt(&ticket.subject, &ticket.message, tier.char_budget());
            let started = Instant::now();

            match self.backend.generate_text(tier.model_id(), &prompt).await {
                Ok(text) => {
                    debug!(
                        model = tier.model_id(),
                        elapsed_secs = started.elapsed().as_secs_f64(),
                        response_chars = text.chars().count(),
                        "generated reply"
                    );
                    return text;
                }
                Err(GenerationFault::RateLimited(detail)) => {
                    warn!(model = tier.model_id(), %detail, "generation quota exhausted");
                    return QUOTA_EXCEEDED_MESSAGE.to_string();
                }
                Err(GenerationFault::ModelNotFound(detail)) => {
                    warn!(model = tier.model_id(), %detail, "requested model unavailable");
                    match tier.downgrade() {
                        Some(lower) => tier = lower,
                        None => return MODEL_UNAVAILABLE_MESSAGE.to_string(),
                    }
                }
                Err(fault) => {
                    warn!(model = tier.model_id(), %fault, "generation failed");
                    return GENERATION_FAILED_MESSAGE.to_string();
                }
            }
        }

        MODEL_UNAVAILABLE_MESSAGE.to_string()
    }

    /// Run the pro and flash tiers back to back on the same ticket and
    /// report both replies with their timings.
    pub async fn compare(&self, ticket: &TicketFields) -> ModelComparison {
        let pro = self.timed_run(ticket, ModelTier::Pro).await;
        let flash = self.timed_run(ticket, ModelTier::Flash).await;

        let time_difference = pro.elapsed.as_secs_f64() - flash.elapsed.as_secs_f64();
        let time_ratio = time_ratio(pro.elapsed, flash.elapsed);

        ModelComparison {
            pro,
            flash,
            time_difference,
            time_ratio,
        }
    }

    async fn timed_run(&self, ticket: &TicketFields, tier: ModelTier) -> ModelRun {
        let started = Instant::now();
        let response = self.suggest(ticket, tier).await;
        let elapsed = started.elapsed();
        let length = response.chars().count();
        ModelRun {
            response,
            elapsed,
            length,
        }
    }
}

fn time_ratio(pro: Duration, flash: Duration) -> f64 {
    if flash.is_zero() {
        f64::INFINITY
    } else {
        pro.as_secs_f64() / flash.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    struct ScriptedBackend {
        outcomes: Mutex<Vec<Result<String, GenerationFault>>>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedBackend {
        fn new(outcomes: Vec<Result<String, GenerationFault>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerationBackend for ScriptedBackend {
        async fn generate_text(
            &self,
            model_id: &str,
            prompt: &str,
        ) -> Result<String, GenerationFault> {
            self.calls
                .lock()
                .unwrap()
                .push((model_id.to_string(), prompt.to_string()));
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    fn ticket() -> TicketFields {
        TicketFields::new("Billing", "I was charged twice this month")
    }

    #[tokio::test]
    async fn returns_backend_text_on_success() {
        let backend = ScriptedBackend::new(vec![Ok("Refund is on its way.".to_string())]);
        let generator = TieredReplyGenerator::new(backend.clone());

        let reply = generator.suggest(&ticket(), ModelTier::Flash).await;

        assert_eq!(reply, "Refund is on its way.");
        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "gemini-1.5-flash-latest");
        assert!(calls[0].1.contains("under 250 characters"));
        assert!(calls[0].1.contains("Ticket Subject: Billing"));
    }

    #[tokio::test]
    async fn quota_fault_maps_to_quota_message_without_retry() {
        let backend = ScriptedBackend::new(vec![Err(GenerationFault::RateLimited(
            "Quota exceeded for model".to_string(),
        ))]);
        let generator = TieredReplyGenerator::new(backend.clone());

        let reply = generator.suggest(&ticket(), ModelTier::Pro).await;

        assert_eq!(reply, QUOTA_EXCEEDED_MESSAGE);
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn missing_pro_model_downgrades_to_flash_once() {
        let backend = ScriptedBackend::new(vec![
            Err(GenerationFault::ModelNotFound("no pro".to_string())),
            Err(GenerationFault::ModelNotFound("no flash".to_string())),
        ]);
        let generator = TieredReplyGenerator::new(backend.clone());

        let reply = generator.suggest(&ticket(), ModelTier::Pro).await;

        assert_eq!(reply, MODEL_UNAVAILABLE_MESSAGE);
        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "gemini-1.5-pro-latest");
        assert_eq!(calls[1].0, "gemini-1.5-flash-latest");
    }

    #[tokio::test]
    async fn downgraded_attempt_uses_flash_budget_and_can_succeed() {
        let backend = ScriptedBackend::new(vec![
            Err(GenerationFault::ModelNotFound("no pro".to_string())),
            Ok("Short answer.".to_string()),
        ]);
        let generator = TieredReplyGenerator::new(backend.clone());

        let reply = generator.suggest(&ticket(), ModelTier::Pro).await;

        assert_eq!(reply, "Short answer.");
        let calls = backend.calls();
        assert!(calls[0].1.contains("under 500 characters"));
        assert!(calls[1].1.contains("under 250 characters"));
    }

    #[tokio::test]
    async fn missing_flash_model_does_not_retry() {
        let backend = ScriptedBackend::new(vec![Err(GenerationFault::ModelNotFound(
            "no flash".to_string(),
        ))]);
        let generator = TieredReplyGenerator::new(backend.clone());

        let reply = generator.suggest(&ticket(), ModelTier::Flash).await;

        assert_eq!(reply, MODEL_UNAVAILABLE_MESSAGE);
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn unclassified_fault_maps_to_generic_message() {
        let backend = ScriptedBackend::new(vec![Err(GenerationFault::Unknown(
            "candidate was blocked".to_string(),
        ))]);
        let generator = TieredReplyGenerator::new(backend.clone());

        let reply = generator.suggest(&ticket(), ModelTier::Flash).await;

        assert_eq!(reply, GENERATION_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn compare_runs_pro_then_flash_sequentially() {
        let backend = ScriptedBackend::new(vec![
            Ok("Pro reply with more room.".to_string()),
            Ok("Flash reply.".to_string()),
        ]);
        let generator = TieredReplyGenerator::new(backend.clone());

        let comparison = generator.compare(&ticket()).await;

        assert_eq!(comparison.pro.response, "Pro reply with more room.");
        assert_eq!(comparison.flash.response, "Flash reply.");
        assert_eq!(comparison.pro.length, 25);
        assert_eq!(comparison.flash.length, 12);
        let calls = backend.calls();
        assert_eq!(calls[0].0, "gemini-1.5-pro-latest");
        assert_eq!(calls[1].0, "gemini-1.5-flash-latest");
    }

    #[test]
    fn time_ratio_is_infinite_for_zero_flash_duration() {
        let ratio = time_ratio(Duration::from_millis(1200), Duration::ZERO);
        assert_eq!(ratio, f64::INFINITY);
    }

    #[test]
    fn time_ratio_divides_elapsed_seconds() {
        let ratio = time_ratio(Duration::from_secs(3), Duration::from_secs(2));
        assert!((ratio - 1.5).abs() < 1e-9);
    }
}
