//! City model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::timezone::TimeZone;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct City {
    pub id: i64,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub timezone: TimeZone,
    pub bot_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewCity {
    pub name: String,
    pub timezone: TimeZone,
    pub bot_id: i64,
}
