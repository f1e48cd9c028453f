use crate::context::AppContext;
use crate::domain::ticket::TicketFields;
use crate::error::AppResult;
use crate::reply::ModelComparison;

#[derive(Debug, Clone)]
pub struct CompareCommandArgs {
    pub subject: String,
    pub message: String,
}

pub async fn run(ctx: &AppContext, args: CompareCommandArgs) -> AppResult<ModelComparison> {
    let ticket = TicketFields::new(args.subject, args.message);
    Ok(ctx.tiered.compare(&ticket).await)
}
