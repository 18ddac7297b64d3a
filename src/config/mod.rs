//! Configuration module

pub mod settings;
pub mod validation;

pub use settings::{
    AdminBotConfig, DatabaseConfig, LoggingConfig, RedisConfig, Settings, WebhookConfig,
};
