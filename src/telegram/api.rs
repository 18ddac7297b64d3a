//! Remote bot API calls used by bot provisioning
//!
//! `CreateBot` depends on exactly three remote semantics: `getMe`,
//! `deleteWebhook(drop_pending_updates)` and `setWebhook(url)`, with
//! malformed-token and unauthorized rejections surfaced as one distinguished
//! failure. The trait keeps the interactor testable with a stub.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::RequestError;
use tracing::{debug, warn};
use url::Url;

use crate::utils::errors::{Result, SalonHubError};

/// The remote bot account's own identity as reported by `getMe`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub telegram_id: i64,
    pub name: String,
}

#[async_trait]
pub trait BotApi {
    /// Fetch the bot's identity. Fails with `InvalidBotToken` when the token
    /// is malformed or the API rejects it as unauthorized.
    async fn get_me(&self, token: &str) -> Result<BotIdentity>;

    /// Drop any pending webhook and, optionally, pending updates.
    async fn delete_webhook(&self, token: &str, drop_pending_updates: bool) -> Result<()>;

    /// Register the webhook URL updates should be delivered to.
    async fn set_webhook(&self, token: &str, url: &str) -> Result<()>;
}

/// teloxide-backed implementation. A transient `Bot` client is constructed
/// per call and released when the call returns, on every exit path.
#[derive(Debug, Clone, Default)]
pub struct TelegramBotApi;

impl TelegramBotApi {
    pub fn new() -> Self {
        Self
    }

    /// Telegram tokens have the shape `<numeric bot id>:<secret>`. Anything
    /// else is rejected before a network round-trip is attempted.
    fn check_token_shape(token: &str) -> Result<()> {
        let (id_part, secret_part) = token.split_once(':').ok_or(SalonHubError::InvalidBotToken)?;
        if id_part.is_empty()
            || secret_part.is_empty()
            || !id_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(SalonHubError::InvalidBotToken);
        }
        Ok(())
    }
}

#[async_trait]
impl BotApi for TelegramBotApi {
    async fn get_me(&self, token: &str) -> Result<BotIdentity> {
        Self::check_token_shape(token)?;
        let bot = Bot::new(token);
        let me = match bot.get_me().await {
            Ok(me) => me,
            Err(RequestError::Api(err)) => {
                warn!(error = %err, "Telegram rejected bot token");
                return Err(SalonHubError::InvalidBotToken);
            }
            Err(err) => return Err(err.into()),
        };
        debug!(bot_telegram_id = me.user.id.0, "Fetched bot identity");
        Ok(BotIdentity {
            telegram_id: me.user.id.0 as i64,
            name: me.user.full_name(),
        })
    }

    async fn delete_webhook(&self, token: &str, drop_pending_updates: bool) -> Result<()> {
        let bot = Bot::new(token);
        bot.delete_webhook()
            .drop_pending_updates(drop_pending_updates)
            .await?;
        Ok(())
    }

    async fn set_webhook(&self, token: &str, url: &str) -> Result<()> {
        let url = Url::parse(url)
            .map_err(|err| SalonHubError::Config(format!("invalid webhook url: {err}")))?;
        let bot = Bot::new(token);
        bot.set_webhook(url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_shape_accepts_telegram_format() {
        assert!(TelegramBotApi::check_token_shape("123456:AAElongsecretpart").is_ok());
    }

    #[test]
    fn token_shape_rejects_garbage() {
        for token in ["", "no-colon", ":secret", "123:", "abc:secret"] {
            assert!(TelegramBotApi::check_token_shape(token).is_err(), "{token}");
        }
    }
}
