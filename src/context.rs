use std::sync::Arc;

use crate::config::AppConfig;
use crate::reply::{ChatReplyGenerator, TieredReplyGenerator};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub tiered: Arc<TieredReplyGenerator>,
    pub chat: Arc<ChatReplyGenerator>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        tiered: Arc<TieredReplyGenerator>,
        chat: Arc<ChatReplyGenerator>,
    ) -> Self {
        Self {
            config,
            tiered,
            chat,
        }
    }
}
