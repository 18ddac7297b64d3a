//! Master model
//!
//! A master belongs to a bot and (nullably) a city, and is associated
//! many-to-many with branches and with services. The service association
//! carries work/break timing in minutes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Master {
    pub id: i64,
    pub name: String,
    pub bot_id: i64,
    pub city_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewMaster {
    pub name: String,
    pub bot_id: i64,
    pub city_id: i64,
}
