use crate::config::ReplyProvider;
use crate::context::AppContext;
use crate::domain::model::ModelTier;
use crate::domain::ticket::TicketFields;
use crate::error::AppResult;

#[derive(Debug, Clone)]
pub struct SuggestCommandArgs {
    pub subject: String,
    pub message: String,
    pub provider: Option<String>,
    pub model: Option<String>,
}

pub async fn run(ctx: &AppContext, args: SuggestCommandArgs) -> AppResult<String> {
    let ticket = TicketFields::new(args.subject, args.message);

    let provider = match args.provider.as_deref() {
        None => ctx.config.default_provider,
        Some(value) => match ReplyProvider::from_str(value) {
            Some(provider) => provider,
            None => {
                eprintln!(
                    "Warning: unknown provider '{value}', using {}.",
                    ctx.config.default_provider.as_str()
                );
                ctx.config.default_provider
            }
        },
    };

    let reply = match provider {
        ReplyProvider::Gemini => {
            // Anything that is not "pro" runs on the flash tier.
            let tier = args
                .model
                .as_deref()
                .and_then(ModelTier::from_str)
                .unwrap_or(ModelTier::Flash);
            ctx.tiered.suggest(&ticket, tier).await
        }
        ReplyProvider::Groq => ctx.chat.suggest(&ticket).await,
    };

    Ok(reply)
}
