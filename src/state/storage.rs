//! State storage implementation
//!
//! Persists conversation contexts in Redis as JSON with a TTL, keyed by
//! (bot_id, chat_id) so contexts never leak between tenants.

use redis::AsyncCommands;
use tracing::{debug, error};

use crate::config::RedisConfig;
use crate::utils::errors::Result;

use super::context::ConversationContext;

/// Redis-based state storage
#[derive(Clone)]
pub struct StateStorage {
    connection_manager: redis::aio::ConnectionManager,
    config: RedisConfig,
}

impl StateStorage {
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    /// Save a conversation context with the configured TTL.
    pub async fn save_context(&self, context: &ConversationContext) -> Result<()> {
        let key = self.context_key(context.bot_id, context.chat_id);
        let serialized = serde_json::to_string(context)?;

        let mut conn = self.connection_manager.clone();
        match conn
            .set_ex::<_, _, ()>(&key, serialized, self.config.ttl_seconds)
            .await
        {
            Ok(_) => {
                debug!(bot_id = context.bot_id, chat_id = context.chat_id,
                       scenario = ?context.scenario, step = ?context.step,
                       "Context saved");
                Ok(())
            }
            Err(e) => {
                error!(bot_id = context.bot_id, chat_id = context.chat_id, error = %e,
                       "Failed to save context");
                Err(e.into())
            }
        }
    }

    /// Load the conversation context for a chat, if one is in progress.
    pub async fn load_context(
        &self,
        bot_id: i64,
        chat_id: i64,
    ) -> Result<Option<ConversationContext>> {
        let key = self.context_key(bot_id, chat_id);
        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = conn.get(&key).await?;
        match serialized {
            Some(data) => {
                let context: ConversationContext = serde_json::from_str(&data)?;
                debug!(bot_id = bot_id, chat_id = chat_id,
                       scenario = ?context.scenario, step = ?context.step,
                       "Context loaded");
                Ok(Some(context))
            }
            None => Ok(None),
        }
    }

    pub async fn delete_context(&self, bot_id: i64, chat_id: i64) -> Result<()> {
        let key = self.context_key(bot_id, chat_id);
        let mut conn = self.connection_manager.clone();

        let deleted: u32 = conn.del(&key).await?;
        if deleted > 0 {
            debug!(bot_id = bot_id, chat_id = chat_id, "Context deleted");
        }

        Ok(())
    }

    pub async fn context_exists(&self, bot_id: i64, chat_id: i64) -> Result<bool> {
        let key = self.context_key(bot_id, chat_id);
        let mut conn = self.connection_manager.clone();

        let exists: bool = conn.exists(&key).await?;
        Ok(exists)
    }

    fn context_key(&self, bot_id: i64, chat_id: i64) -> String {
        format!("{}state:{}:{}", self.config.prefix, bot_id, chat_id)
    }

    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

impl std::fmt::Debug for StateStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStorage")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
