//! Branch model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewBranch {
    pub name: String,
    pub address: String,
    pub city_id: i64,
}

/// A branch of a bot tagged with whether a given master works there.
/// Produced by the availability partition query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AvailableBranch {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city_id: i64,
    pub is_associated: bool,
}
