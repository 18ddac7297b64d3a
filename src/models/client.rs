//! Client model
//!
//! An end customer registered with one tenant bot. Unique per
//! (bot_id, telegram_id).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: i64,
    pub telegram_id: i64,
    pub name: String,
    pub bot_id: i64,
    pub city_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewClient {
    pub telegram_id: i64,
    pub name: String,
    pub bot_id: i64,
    pub city_id: i64,
}
