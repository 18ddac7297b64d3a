//! Configuration validation module

use crate::utils::errors::{Result, SalonHubError};

use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_admin_bot_config(&settings.admin_bot)?;
    validate_webhook_config(&settings.webhook)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

fn validate_admin_bot_config(config: &super::AdminBotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(SalonHubError::Config(
            "Admin bot token is required".to_string(),
        ));
    }

    Ok(())
}

fn validate_webhook_config(config: &super::WebhookConfig) -> Result<()> {
    if !config.host.starts_with("https://") {
        return Err(SalonHubError::Config(
            "Webhook host must be an https:// URL".to_string(),
        ));
    }

    if !config.admin_path.starts_with('/') {
        return Err(SalonHubError::Config(
            "Admin webhook path must start with '/'".to_string(),
        ));
    }

    if !config.multibot_path_prefix.starts_with('/') {
        return Err(SalonHubError::Config(
            "Multibot path prefix must start with '/'".to_string(),
        ));
    }

    if config.admin_path == config.multibot_path_prefix {
        return Err(SalonHubError::Config(
            "Admin path and multibot prefix must differ".to_string(),
        ));
    }

    Ok(())
}

fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(SalonHubError::Config(
            "Database URL is required".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(SalonHubError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(SalonHubError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(SalonHubError::Config("Redis URL is required".to_string()));
    }

    Ok(())
}

fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(SalonHubError::Config("Log level is required".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.admin_bot.token = "12345:TEST_TOKEN".to_string();
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_admin_token_rejected() {
        let mut settings = valid_settings();
        settings.admin_bot.token = String::new();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_non_https_host_rejected() {
        let mut settings = valid_settings();
        settings.webhook.host = "http://insecure.example.com".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_colliding_paths_rejected() {
        let mut settings = valid_settings();
        settings.webhook.admin_path = "/webhook/bot".to_string();
        settings.webhook.multibot_path_prefix = "/webhook/bot".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
