//! Bot model
//!
//! A tenant bot registered by a manager. The token is the Telegram-issued
//! secret; `telegram_id` is the bot account's own Telegram user id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bot {
    pub id: i64,
    pub token: String,
    pub telegram_id: i64,
    pub name: String,
    pub manager_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A bot row before persistence, assembled by CreateBot after the remote
/// identity fetch.
#[derive(Debug, Clone)]
pub struct NewBot {
    pub token: String,
    pub telegram_id: i64,
    pub name: String,
    pub manager_id: i64,
}
