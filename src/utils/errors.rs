//! Error handling for SalonHub
//!
//! This module defines the main error type used throughout the application.
//! Domain signals (not-found, already-exists, invalid input) are modelled as
//! dedicated variants so interactors can match the one expected failure of a
//! probe and let everything else propagate unchanged.

use thiserror::Error;

/// Main error type for the SalonHub application
#[derive(Error, Debug)]
pub enum SalonHubError {
    // Not-found family: one variant per (entity, key) pair. Callers rely on
    // the distinction, e.g. BotTokenNotFound during CreateBot means "proceed".
    #[error("Bot not found: id {bot_id}")]
    BotIdNotFound { bot_id: i64 },

    #[error("Bot not found by token")]
    BotTokenNotFound,

    #[error("Bot not found: telegram id {telegram_id}")]
    BotTelegramIdNotFound { telegram_id: i64 },

    #[error("Manager not found: id {manager_id}")]
    ManagerIdNotFound { manager_id: i64 },

    #[error("Manager not found: telegram id {telegram_id}")]
    ManagerTelegramIdNotFound { telegram_id: i64 },

    #[error("City not found: id {city_id}")]
    CityIdNotFound { city_id: i64 },

    #[error("Branch not found: id {branch_id}")]
    BranchIdNotFound { branch_id: i64 },

    #[error("Service not found: id {service_id}")]
    ServiceIdNotFound { service_id: i64 },

    #[error("Master not found: id {master_id}")]
    MasterIdNotFound { master_id: i64 },

    #[error("Client not found: id {client_id}")]
    ClientIdNotFound { client_id: i64 },

    #[error("Client not found: telegram id {telegram_id} for bot {bot_id}")]
    ClientTelegramIdNotFound { bot_id: i64, telegram_id: i64 },

    // Already-exists family: expected exit path of the probe-then-create
    // pattern in the creation interactors.
    #[error("Bot already exists")]
    BotAlreadyExists,

    #[error("Manager already exists: telegram id {telegram_id}")]
    ManagerAlreadyExists { telegram_id: i64 },

    #[error("Client already exists: telegram id {telegram_id} for bot {bot_id}")]
    ClientAlreadyExists { bot_id: i64, telegram_id: i64 },

    #[error("Invalid bot token")]
    InvalidBotToken,

    #[error("Insufficient data: no lookup key supplied")]
    InsufficientData,

    #[error("Invalid timezone: {0}")]
    InvalidTimeZone(String),

    #[error("Unit of work already committed")]
    TransactionClosed,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for SalonHub operations
pub type Result<T> = std::result::Result<T, SalonHubError>;

impl SalonHubError {
    /// Whether the error is a caller-visible domain signal rather than an
    /// infrastructure failure. The webhook layer uses this to pick the log
    /// level and response status.
    pub fn is_domain(&self) -> bool {
        !matches!(
            self,
            SalonHubError::Database(_)
                | SalonHubError::Migration(_)
                | SalonHubError::Telegram(_)
                | SalonHubError::Redis(_)
                | SalonHubError::Serialization(_)
                | SalonHubError::Io(_)
                | SalonHubError::Config(_)
                | SalonHubError::TransactionClosed
        )
    }

    /// Whether the error is a not-found signal (any key space).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SalonHubError::BotIdNotFound { .. }
                | SalonHubError::BotTokenNotFound
                | SalonHubError::BotTelegramIdNotFound { .. }
                | SalonHubError::ManagerIdNotFound { .. }
                | SalonHubError::ManagerTelegramIdNotFound { .. }
                | SalonHubError::CityIdNotFound { .. }
                | SalonHubError::BranchIdNotFound { .. }
                | SalonHubError::ServiceIdNotFound { .. }
                | SalonHubError::MasterIdNotFound { .. }
                | SalonHubError::ClientIdNotFound { .. }
                | SalonHubError::ClientTelegramIdNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_flagged() {
        assert!(SalonHubError::BotAlreadyExists.is_domain());
        assert!(SalonHubError::InsufficientData.is_domain());
        assert!(SalonHubError::BotTokenNotFound.is_domain());
        assert!(!SalonHubError::TransactionClosed.is_domain());
        assert!(!SalonHubError::Config("x".into()).is_domain());
    }

    #[test]
    fn not_found_family_is_distinguished() {
        assert!(SalonHubError::BotIdNotFound { bot_id: 1 }.is_not_found());
        assert!(SalonHubError::ClientTelegramIdNotFound { bot_id: 1, telegram_id: 2 }.is_not_found());
        assert!(!SalonHubError::BotAlreadyExists.is_not_found());
    }
}
