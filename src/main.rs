//! SalonHub Telegram Bot Platform
//!
//! Main application entry point

use teloxide::prelude::*;
use tracing::info;
use url::Url;

use SalonHub::{
    config::Settings,
    database::{connection, GatewayFactory},
    state::{EventIsolation, StateStorage},
    telegram::{MultibotWebhookUrl, TelegramBotApi},
    utils::logging,
    webhook::{build_router, AppState, MultibotRegistry},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on shutdown
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting SalonHub...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = connection::DatabaseConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        ..Default::default()
    };
    let db_pool = connection::create_pool(&db_config).await?;
    connection::run_migrations(&db_pool).await?;

    // Initialize Redis-backed state management
    info!("Connecting to Redis...");
    let state_storage = StateStorage::new(settings.redis.clone()).await?;
    let isolation = EventIsolation::new(&settings.redis).await?;

    let gateway_factory = GatewayFactory::new(db_pool);
    let registry = MultibotRegistry::new(gateway_factory.clone());
    let webhook_url = MultibotWebhookUrl::new(
        settings.webhook.host.clone(),
        settings.webhook.multibot_path_prefix.clone(),
    );

    // Point the admin bot's webhook at this instance
    let admin_bot = Bot::new(&settings.admin_bot.token);
    let me = admin_bot.get_me().await?;
    let admin_bot_id = me.user.id.0 as i64;
    info!(admin_bot_id = admin_bot_id, "Admin bot identity confirmed");

    let admin_webhook = Url::parse(&format!(
        "{}{}",
        settings.webhook.host.trim_end_matches('/'),
        settings.webhook.admin_path
    ))?;
    let mut set_webhook = admin_bot.set_webhook(admin_webhook);
    if let Some(secret) = &settings.admin_bot.secret {
        set_webhook = set_webhook.secret_token(secret.clone());
    }
    set_webhook.await?;
    info!("Admin bot webhook registered");

    let app_state = AppState {
        admin_bot,
        admin_bot_id,
        admin_secret: settings.admin_bot.secret.clone(),
        registry,
        gateway_factory,
        state_storage,
        isolation,
        webhook_url,
        bot_api: TelegramBotApi::new(),
    };

    let router = build_router(&settings.webhook.admin_path, app_state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", settings.webhook.port)).await?;
    info!(port = settings.webhook.port, "SalonHub is ready, serving webhooks");

    axum::serve(listener, router).await?;

    info!("SalonHub has been shut down.");
    Ok(())
}
