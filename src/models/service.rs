//! Service model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub bot_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub bot_id: i64,
}

/// A service of a bot tagged with whether a given master provides it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AvailableService {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub bot_id: i64,
    pub is_associated: bool,
}
