//! Manager model
//!
//! A manager is a Telegram user who owns one or more tenant bots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Manager {
    pub id: i64,
    pub telegram_id: i64,
    pub created_at: DateTime<Utc>,
}
