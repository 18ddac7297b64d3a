//! Client use cases
//!
//! Clients arrive through a tenant bot, so registration is keyed by the
//! *bot's* Telegram id (the only identity the transport knows) rather than
//! the internal bot id.

use tracing::info;

use crate::application::interfaces::{BotReader, ClientReader, ClientSaver, Committer};
use crate::models::{Client, NewClient};
use crate::utils::errors::{Result, SalonHubError};

#[derive(Debug, Clone)]
pub struct CreateClientDto {
    pub name: String,
    pub telegram_id: i64,
    pub bot_telegram_id: i64,
    pub city_id: i64,
}

pub struct CreateClient<G, B> {
    gateway: G,
    bot_gateway: B,
}

impl<G, B> CreateClient<G, B>
where
    G: Committer + ClientReader + ClientSaver,
    B: BotReader,
{
    pub fn new(gateway: G, bot_gateway: B) -> Self {
        Self { gateway, bot_gateway }
    }

    pub async fn execute(mut self, data: CreateClientDto) -> Result<i64> {
        let bot = self
            .bot_gateway
            .get_bot_by_telegram_id(data.bot_telegram_id)
            .await?;
        match self
            .gateway
            .get_client_by_telegram_id(bot.id, data.telegram_id)
            .await
        {
            Ok(_) => {
                return Err(SalonHubError::ClientAlreadyExists {
                    bot_id: bot.id,
                    telegram_id: data.telegram_id,
                })
            }
            Err(SalonHubError::ClientTelegramIdNotFound { .. }) => {}
            Err(err) => return Err(err),
        }
        let client_id = self
            .gateway
            .save_client(&NewClient {
                telegram_id: data.telegram_id,
                name: data.name,
                bot_id: bot.id,
                city_id: data.city_id,
            })
            .await?;
        self.gateway.commit().await?;
        info!(client_id = client_id, bot_id = bot.id, "Client registered");
        Ok(client_id)
    }
}

/// Polymorphic lookup: primary id first, then the (bot_id, telegram_id)
/// pair.
#[derive(Debug, Clone, Default)]
pub struct GetClientDto {
    pub client_id: Option<i64>,
    pub telegram_id: Option<i64>,
    pub bot_id: Option<i64>,
}

pub struct GetClient<G> {
    gateway: G,
}

impl<G: ClientReader> GetClient<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: GetClientDto) -> Result<Client> {
        if let Some(client_id) = data.client_id {
            self.gateway.get_client(client_id).await
        } else if let (Some(telegram_id), Some(bot_id)) = (data.telegram_id, data.bot_id) {
            self.gateway.get_client_by_telegram_id(bot_id, telegram_id).await
        } else {
            Err(SalonHubError::InsufficientData)
        }
    }
}
