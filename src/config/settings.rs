//! Application settings management
//!
//! Configuration is loaded from an optional `config.toml` next to the binary
//! and overridden by `SALONHUB_*` environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub admin_bot: AdminBotConfig,
    pub webhook: WebhookConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub logging: LoggingConfig,
}

/// Admin bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminBotConfig {
    pub token: String,
    /// Value checked against X-Telegram-Bot-Api-Secret-Token on the admin
    /// webhook path. Tenant paths are authenticated by the token in the URL.
    pub secret: Option<String>,
}

/// Webhook server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookConfig {
    /// Public HTTPS origin Telegram calls back to, e.g. "https://bots.example.com"
    pub host: String,
    pub port: u16,
    pub admin_path: String,
    pub multibot_path_prefix: String,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SALONHUB").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::SalonHubError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            admin_bot: AdminBotConfig {
                token: String::new(),
                secret: None,
            },
            webhook: WebhookConfig {
                host: "https://localhost".to_string(),
                port: 8080,
                admin_path: "/webhook/admin".to_string(),
                multibot_path_prefix: "/webhook/bot".to_string(),
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/salonhub".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "salonhub:".to_string(),
                ttl_seconds: 3600,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "./logs".to_string(),
            },
        }
    }
}
