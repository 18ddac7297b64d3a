//! Appointment model
//!
//! Part of the relational schema; no interactor operates on it yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    pub id: i64,
    pub date_time: DateTime<Utc>,
    pub master_id: i64,
    pub client_id: i64,
}
