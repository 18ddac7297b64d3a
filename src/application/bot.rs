//! Bot use cases
//!
//! Tenant bot provisioning and the bot-scoped queries the admin panel and
//! client bots read from.

use tracing::{info, warn};

use crate::application::interfaces::{BotReader, BotSaver, Committer};
use crate::models::{Bot, Branch, City, Master, NewBot, Service};
use crate::telegram::{BotApi, MultibotWebhookUrl};
use crate::utils::errors::{Result, SalonHubError};

#[derive(Debug, Clone)]
pub struct NewBotDto {
    pub token: String,
    pub manager_id: i64,
}

/// Provisions a tenant bot: probe the token locally, validate it against the
/// Telegram Bot API, point the remote webhook at this hub, persist the row.
///
/// Remote side effects happen before the insert; if persistence fails after
/// webhook registration succeeded, remote and local state diverge and no
/// compensation is attempted.
pub struct CreateBot<G, A> {
    gateway: G,
    api: A,
    webhook_url: MultibotWebhookUrl,
}

impl<G, A> CreateBot<G, A>
where
    G: Committer + BotReader + BotSaver,
    A: BotApi,
{
    pub fn new(gateway: G, api: A, webhook_url: MultibotWebhookUrl) -> Self {
        Self { gateway, api, webhook_url }
    }

    pub async fn execute(mut self, data: NewBotDto) -> Result<i64> {
        // Only the token-not-found probe result lets creation proceed.
        match self.gateway.get_bot_by_token(&data.token).await {
            Ok(_) => return Err(SalonHubError::BotAlreadyExists),
            Err(SalonHubError::BotTokenNotFound) => {}
            Err(err) => return Err(err),
        }

        let identity = match self.api.get_me(&data.token).await {
            Ok(identity) => identity,
            Err(SalonHubError::InvalidBotToken) => {
                warn!(manager_id = data.manager_id, "Rejected invalid bot token");
                return Err(SalonHubError::InvalidBotToken);
            }
            Err(err) => return Err(err),
        };

        self.api.delete_webhook(&data.token, true).await?;
        self.api
            .set_webhook(&data.token, &self.webhook_url.format(&data.token))
            .await?;

        let bot_id = self
            .gateway
            .save_bot(&NewBot {
                token: data.token,
                telegram_id: identity.telegram_id,
                name: identity.name,
                manager_id: data.manager_id,
            })
            .await?;
        self.gateway.commit().await?;
        info!(
            bot_id = bot_id,
            bot_telegram_id = identity.telegram_id,
            manager_id = data.manager_id,
            "Tenant bot provisioned"
        );
        Ok(bot_id)
    }
}

/// Polymorphic lookup; keys are tried in priority order: primary id, then
/// token, then the bot account's telegram id.
#[derive(Debug, Clone, Default)]
pub struct GetBotDto {
    pub bot_id: Option<i64>,
    pub token: Option<String>,
    pub telegram_id: Option<i64>,
}

pub struct GetBot<G> {
    gateway: G,
}

impl<G: BotReader> GetBot<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: GetBotDto) -> Result<Bot> {
        if let Some(bot_id) = data.bot_id {
            self.gateway.get_bot(bot_id).await
        } else if let Some(token) = data.token {
            self.gateway.get_bot_by_token(&token).await
        } else if let Some(telegram_id) = data.telegram_id {
            self.gateway.get_bot_by_telegram_id(telegram_id).await
        } else {
            Err(SalonHubError::InsufficientData)
        }
    }
}

/// Shared key shape of the bot-scoped listing queries: internal bot id or the
/// bot account's telegram id.
#[derive(Debug, Clone, Default)]
pub struct BotScopeDto {
    pub bot_id: Option<i64>,
    pub bot_telegram_id: Option<i64>,
}

/// Every city belonging to the bot.
pub struct GetBotCities<G> {
    gateway: G,
}

impl<G: BotReader> GetBotCities<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: BotScopeDto) -> Result<Vec<City>> {
        if let Some(bot_id) = data.bot_id {
            self.gateway.get_bot_cities(bot_id).await
        } else if let Some(telegram_id) = data.bot_telegram_id {
            let bot = self.gateway.get_bot_by_telegram_id(telegram_id).await?;
            self.gateway.get_bot_cities(bot.id).await
        } else {
            Err(SalonHubError::InsufficientData)
        }
    }
}

/// Every service belonging to the bot.
pub struct GetBotServices<G> {
    gateway: G,
}

impl<G: BotReader> GetBotServices<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: BotScopeDto) -> Result<Vec<Service>> {
        if let Some(bot_id) = data.bot_id {
            self.gateway.get_bot_services(bot_id).await
        } else if let Some(telegram_id) = data.bot_telegram_id {
            let bot = self.gateway.get_bot_by_telegram_id(telegram_id).await?;
            self.gateway.get_bot_services(bot.id).await
        } else {
            Err(SalonHubError::InsufficientData)
        }
    }
}

/// Every branch belonging to the bot, transitively through its cities.
pub struct GetBotBranches<G> {
    gateway: G,
}

impl<G: BotReader> GetBotBranches<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: BotScopeDto) -> Result<Vec<Branch>> {
        if let Some(bot_id) = data.bot_id {
            self.gateway.get_bot_branches(bot_id).await
        } else if let Some(telegram_id) = data.bot_telegram_id {
            let bot = self.gateway.get_bot_by_telegram_id(telegram_id).await?;
            self.gateway.get_bot_branches(bot.id).await
        } else {
            Err(SalonHubError::InsufficientData)
        }
    }
}

/// Every master belonging to the bot.
pub struct GetBotMasters<G> {
    gateway: G,
}

impl<G: BotReader> GetBotMasters<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: BotScopeDto) -> Result<Vec<Master>> {
        if let Some(bot_id) = data.bot_id {
            self.gateway.get_bot_masters(bot_id).await
        } else if let Some(telegram_id) = data.bot_telegram_id {
            let bot = self.gateway.get_bot_by_telegram_id(telegram_id).await?;
            self.gateway.get_bot_masters(bot.id).await
        } else {
            Err(SalonHubError::InsufficientData)
        }
    }
}
