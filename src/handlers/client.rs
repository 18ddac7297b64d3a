//! Client bot handlers
//!
//! Conversation flow for end customers talking to a tenant bot: greeting for
//! registered clients, two-step registration (name, then city) for new ones.
//! The flow state lives in Redis, keyed per bot and chat.

use teloxide::prelude::*;
use teloxide::types::{ChatId, Message, Update, UpdateKind};
use tracing::{debug, info};

use crate::application::{
    BotScopeDto, CreateClient, CreateClientDto, GetBotCities, GetClient, GetClientDto,
};
use crate::state::ConversationContext;
use crate::utils::errors::{Result, SalonHubError};
use crate::webhook::{AppState, TenantContext};

const SCENARIO: &str = "registration";
const STEP_NAME: &str = "awaiting_name";
const STEP_CITY: &str = "awaiting_city";

pub async fn handle_update(state: &AppState, ctx: &TenantContext, update: Update) -> Result<()> {
    let UpdateKind::Message(msg) = update.kind else {
        return Ok(());
    };
    handle_message(state, ctx, msg).await
}

async fn handle_message(state: &AppState, ctx: &TenantContext, msg: Message) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let telegram_id = user.id.0 as i64;
    let chat_id = msg.chat.id;
    let _lock = state.isolation.acquire(ctx.bot_id, chat_id.0).await?;

    if text.trim() == "/start" {
        return cmd_start(state, ctx, chat_id, telegram_id).await;
    }

    if let Some(context) = state.state_storage.load_context(ctx.bot_id, chat_id.0).await? {
        if context.is_in(SCENARIO, STEP_NAME) {
            return step_name(state, ctx, chat_id, context, text).await;
        }
        if context.is_in(SCENARIO, STEP_CITY) {
            return step_city(state, ctx, chat_id, telegram_id, context, text).await;
        }
    }

    ctx.bot
        .send_message(chat_id, "Send /start to begin.")
        .await?;
    Ok(())
}

async fn cmd_start(
    state: &AppState,
    ctx: &TenantContext,
    chat_id: ChatId,
    telegram_id: i64,
) -> Result<()> {
    let gateway = state.gateway_factory.begin().await?;
    match GetClient::new(gateway)
        .execute(GetClientDto {
            client_id: None,
            telegram_id: Some(telegram_id),
            bot_id: Some(ctx.bot_id),
        })
        .await
    {
        Ok(client) => {
            // Known client; drop any half-finished registration.
            state.state_storage.delete_context(ctx.bot_id, chat_id.0).await?;
            ctx.bot
                .send_message(chat_id, format!("Hello, {}! Good to see you again.", client.name))
                .await?;
        }
        Err(SalonHubError::ClientTelegramIdNotFound { .. }) => {
            debug!(bot_id = ctx.bot_id, telegram_id = telegram_id, "Starting client registration");
            let mut context = ConversationContext::new(ctx.bot_id, chat_id.0);
            context.start_scenario(SCENARIO, STEP_NAME);
            state.state_storage.save_context(&context).await?;
            ctx.bot
                .send_message(
                    chat_id,
                    format!("Welcome to {}! What's your name?", ctx.name),
                )
                .await?;
        }
        Err(err) => return Err(err),
    }
    Ok(())
}

async fn step_name(
    state: &AppState,
    ctx: &TenantContext,
    chat_id: ChatId,
    mut context: ConversationContext,
    text: &str,
) -> Result<()> {
    let name = text.trim();
    if name.is_empty() {
        ctx.bot.send_message(chat_id, "Please send your name.").await?;
        return Ok(());
    }

    let gateway = state.gateway_factory.begin().await?;
    let cities = GetBotCities::new(gateway)
        .execute(BotScopeDto {
            bot_id: Some(ctx.bot_id),
            bot_telegram_id: None,
        })
        .await?;

    if cities.is_empty() {
        state.state_storage.delete_context(ctx.bot_id, chat_id.0).await?;
        ctx.bot
            .send_message(chat_id, "This salon is not accepting registrations yet. Please try later.")
            .await?;
        return Ok(());
    }

    context.set_data("name", name)?;
    context.set_data("city_ids", cities.iter().map(|c| c.id).collect::<Vec<i64>>())?;
    context.advance(STEP_CITY);
    state.state_storage.save_context(&context).await?;

    let mut lines = vec![format!("Nice to meet you, {name}! Which city are you in?")];
    for (i, city) in cities.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, city.name));
    }
    lines.push("Reply with a number.".to_string());
    ctx.bot.send_message(chat_id, lines.join("\n")).await?;
    Ok(())
}

async fn step_city(
    state: &AppState,
    ctx: &TenantContext,
    chat_id: ChatId,
    telegram_id: i64,
    context: ConversationContext,
    text: &str,
) -> Result<()> {
    let city_ids: Vec<i64> = context.get_data("city_ids").unwrap_or_default();
    let choice = text
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| city_ids.get(i).copied());

    let Some(city_id) = choice else {
        ctx.bot
            .send_message(chat_id, "Please reply with one of the listed numbers.")
            .await?;
        return Ok(());
    };

    let name = match context.get_string("name") {
        Some(name) => name,
        None => {
            // Context lost its payload; restart cleanly.
            state.state_storage.delete_context(ctx.bot_id, chat_id.0).await?;
            ctx.bot.send_message(chat_id, "Send /start to begin.").await?;
            return Ok(());
        }
    };

    let gateway = state.gateway_factory.begin().await?;
    let bot_gateway = state.gateway_factory.begin().await?;
    match CreateClient::new(gateway, bot_gateway)
        .execute(CreateClientDto {
            name: name.clone(),
            telegram_id,
            bot_telegram_id: ctx.bot_telegram_id,
            city_id,
        })
        .await
    {
        Ok(client_id) => {
            info!(client_id = client_id, bot_id = ctx.bot_id, "Client registration completed");
        }
        // A duplicate /start race already registered this client.
        Err(SalonHubError::ClientAlreadyExists { .. }) => {}
        Err(err) => return Err(err),
    }

    state.state_storage.delete_context(ctx.bot_id, chat_id.0).await?;
    ctx.bot
        .send_message(chat_id, format!("You're all set, {name}! We'll see you soon."))
        .await?;
    Ok(())
}
