//! Logging configuration and setup
//!
//! This module provides logging initialization for the SalonHub application.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration. The returned guard flushes the
/// file writer; the caller must keep it alive for the process lifetime.
pub fn init_logging(config: &LoggingConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "salonhub.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log an inbound webhook update with structured data
pub fn log_webhook_update(dispatcher: &str, bot_id: Option<i64>, update_id: u32) {
    info!(
        dispatcher = dispatcher,
        bot_id = bot_id,
        update_id = update_id,
        "Webhook update received"
    );
}
