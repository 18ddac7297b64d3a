//! Admin bot handlers
//!
//! Commands salon managers use to register themselves and connect their
//! tenant bots to the hub.

use teloxide::prelude::*;
use teloxide::types::{ChatId, Message, Update, UpdateKind};
use tracing::{debug, info};

use crate::application::{
    CreateBot, CreateManager, CreateManagerDto, GetManager, GetManagerBots, GetManagerBotsDto,
    GetManagerDto, NewBotDto,
};
use crate::utils::errors::{Result, SalonHubError};
use crate::webhook::AppState;

pub async fn handle_update(state: &AppState, update: Update) -> Result<()> {
    let UpdateKind::Message(msg) = update.kind else {
        return Ok(());
    };
    handle_message(state, msg).await
}

async fn handle_message(state: &AppState, msg: Message) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let telegram_id = user.id.0 as i64;
    let chat_id = msg.chat.id;
    let _lock = state.isolation.acquire(state.admin_bot_id, chat_id.0).await?;

    debug!(telegram_id = telegram_id, "Processing admin command");

    let mut parts = text.trim().split_whitespace();
    match parts.next() {
        Some("/start") => cmd_start(state, chat_id, telegram_id).await,
        Some("/addbot") => cmd_add_bot(state, chat_id, telegram_id, parts.next()).await,
        Some("/bots") => cmd_list_bots(state, chat_id, telegram_id).await,
        _ => {
            state
                .admin_bot
                .send_message(
                    chat_id,
                    "Commands:\n/start - register as a manager\n/addbot <token> - connect a salon bot\n/bots - list your bots",
                )
                .await?;
            Ok(())
        }
    }
}

async fn cmd_start(state: &AppState, chat_id: ChatId, telegram_id: i64) -> Result<()> {
    let gateway = state.gateway_factory.begin().await?;
    match CreateManager::new(gateway)
        .execute(CreateManagerDto { telegram_id })
        .await
    {
        Ok(manager_id) => {
            info!(manager_id = manager_id, "New manager onboarded");
            state
                .admin_bot
                .send_message(
                    chat_id,
                    "Welcome! Connect your salon bot with /addbot <token>.",
                )
                .await?;
        }
        Err(SalonHubError::ManagerAlreadyExists { .. }) => {
            state
                .admin_bot
                .send_message(chat_id, "Welcome back! Use /bots to see your bots.")
                .await?;
        }
        Err(err) => return Err(err),
    }
    Ok(())
}

async fn cmd_add_bot(
    state: &AppState,
    chat_id: ChatId,
    telegram_id: i64,
    token: Option<&str>,
) -> Result<()> {
    let Some(token) = token else {
        state
            .admin_bot
            .send_message(chat_id, "Usage: /addbot <token from @BotFather>")
            .await?;
        return Ok(());
    };

    let gateway = state.gateway_factory.begin().await?;
    let manager = match GetManager::new(gateway)
        .execute(GetManagerDto {
            manager_id: None,
            telegram_id: Some(telegram_id),
        })
        .await
    {
        Ok(manager) => manager,
        Err(SalonHubError::ManagerTelegramIdNotFound { .. }) => {
            state
                .admin_bot
                .send_message(chat_id, "Please register first with /start.")
                .await?;
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    let gateway = state.gateway_factory.begin().await?;
    let create = CreateBot::new(gateway, state.bot_api.clone(), state.webhook_url.clone());
    match create
        .execute(NewBotDto {
            token: token.to_string(),
            manager_id: manager.id,
        })
        .await
    {
        Ok(bot_id) => {
            info!(bot_id = bot_id, manager_id = manager.id, "Bot connected by manager");
            state
                .admin_bot
                .send_message(chat_id, "Bot connected. It is now accepting clients.")
                .await?;
        }
        Err(SalonHubError::InvalidBotToken) => {
            state
                .admin_bot
                .send_message(chat_id, "Telegram rejected that token. Check it and try again.")
                .await?;
        }
        Err(SalonHubError::BotAlreadyExists) => {
            state
                .admin_bot
                .send_message(chat_id, "That bot is already connected.")
                .await?;
        }
        Err(err) => return Err(err),
    }
    Ok(())
}

async fn cmd_list_bots(state: &AppState, chat_id: ChatId, telegram_id: i64) -> Result<()> {
    let gateway = state.gateway_factory.begin().await?;
    let bots = match GetManagerBots::new(gateway)
        .execute(GetManagerBotsDto {
            manager_id: None,
            telegram_id: Some(telegram_id),
        })
        .await
    {
        Ok(bots) => bots,
        Err(SalonHubError::ManagerTelegramIdNotFound { .. }) => {
            state
                .admin_bot
                .send_message(chat_id, "Please register first with /start.")
                .await?;
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    let text = if bots.is_empty() {
        "You have no bots yet. Connect one with /addbot <token>.".to_string()
    } else {
        let mut lines = vec!["Your bots:".to_string()];
        for bot in &bots {
            lines.push(format!("- {}", bot.name));
        }
        lines.join("\n")
    };
    state.admin_bot.send_message(chat_id, text).await?;
    Ok(())
}
