//! Tenant bot registry
//!
//! Maps a bot token from the webhook path to a cached dispatcher context.
//! Unknown tokens are resolved against the database once; concurrent misses
//! for the same token serialize on the write lock so only one probe runs.

use std::collections::HashMap;
use std::sync::Arc;

use teloxide::Bot;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::application::interfaces::BotReader;
use crate::database::GatewayFactory;
use crate::utils::errors::{Result, SalonHubError};

/// Everything a tenant update needs that is fixed for the bot's lifetime.
/// The teloxide client is built once per bot and shared across updates.
#[derive(Clone)]
pub struct TenantContext {
    pub bot: Bot,
    pub bot_id: i64,
    pub bot_telegram_id: i64,
    pub name: String,
}

impl std::fmt::Debug for TenantContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantContext")
            .field("bot_id", &self.bot_id)
            .field("bot_telegram_id", &self.bot_telegram_id)
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Clone)]
pub struct MultibotRegistry {
    entries: Arc<RwLock<HashMap<String, Arc<TenantContext>>>>,
    gateway_factory: GatewayFactory,
}

impl MultibotRegistry {
    pub fn new(gateway_factory: GatewayFactory) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            gateway_factory,
        }
    }

    /// Resolve a webhook path token to its tenant context. Returns `None`
    /// when no bot with this token exists, which the router answers with 404.
    pub async fn resolve(&self, token: &str) -> Result<Option<Arc<TenantContext>>> {
        {
            let entries = self.entries.read().await;
            if let Some(ctx) = entries.get(token) {
                return Ok(Some(ctx.clone()));
            }
        }

        let mut entries = self.entries.write().await;
        // Another task may have resolved this token while we waited.
        if let Some(ctx) = entries.get(token) {
            return Ok(Some(ctx.clone()));
        }

        let mut gateway = self.gateway_factory.begin().await?;
        let bot = match gateway.get_bot_by_token(token).await {
            Ok(bot) => bot,
            Err(SalonHubError::BotTokenNotFound) => {
                debug!("Webhook token matches no registered bot");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let ctx = Arc::new(TenantContext {
            bot: Bot::new(token),
            bot_id: bot.id,
            bot_telegram_id: bot.telegram_id,
            name: bot.name,
        });
        entries.insert(token.to_string(), ctx.clone());
        info!(bot_id = ctx.bot_id, "Tenant bot loaded into registry");

        Ok(Some(ctx))
    }

    /// Drop a cached context, forcing the next update to re-probe the
    /// database. Used when a bot is deleted or its token revoked.
    pub async fn evict(&self, token: &str) {
        let mut entries = self.entries.write().await;
        if entries.remove(token).is_some() {
            info!("Tenant bot evicted from registry");
        }
    }
}

impl std::fmt::Debug for MultibotRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultibotRegistry").finish_non_exhaustive()
    }
}
