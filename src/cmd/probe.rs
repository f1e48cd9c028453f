use crate::context::AppContext;
use crate::error::AppResult;
use crate::reply::ProbeOutcome;

pub async fn run(ctx: &AppContext) -> AppResult<ProbeOutcome> {
    Ok(ctx.chat.probe().await)
}
