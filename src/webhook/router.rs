//! Webhook HTTP router
//!
//! Two POST routes: the fixed admin path, authenticated by the optional
//! Telegram secret token header, and the tenant path where the final URL
//! segment is the bot token. Updates are acknowledged immediately and
//! processed on a detached task; Telegram retries non-2xx responses, and a
//! domain error is not something a retry can fix.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use teloxide::types::Update;
use tracing::{error, warn};

use crate::database::GatewayFactory;
use crate::handlers;
use crate::state::{EventIsolation, StateStorage};
use crate::telegram::{MultibotWebhookUrl, TelegramBotApi};
use crate::utils::logging::log_webhook_update;

use super::registry::MultibotRegistry;

const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

#[derive(Clone)]
pub struct AppState {
    pub admin_bot: teloxide::Bot,
    pub admin_bot_id: i64,
    pub admin_secret: Option<String>,
    pub registry: MultibotRegistry,
    pub gateway_factory: GatewayFactory,
    pub state_storage: StateStorage,
    pub isolation: EventIsolation,
    pub webhook_url: MultibotWebhookUrl,
    pub bot_api: TelegramBotApi,
}

pub fn build_router(admin_path: &str, state: AppState) -> Router {
    Router::new()
        .route(admin_path, post(admin_update))
        .route(&state.webhook_url.route_pattern(), post(tenant_update))
        .with_state(state)
}

async fn admin_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<Update>,
) -> StatusCode {
    if let Some(expected) = &state.admin_secret {
        let presented = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        if presented != Some(expected.as_str()) {
            warn!("Admin webhook called with missing or wrong secret token");
            return StatusCode::UNAUTHORIZED;
        }
    }

    log_webhook_update("admin", None, update.id.0);

    tokio::spawn(async move {
        if let Err(err) = handlers::admin::handle_update(&state, update).await {
            if err.is_domain() {
                warn!(error = %err, "Admin update rejected");
            } else {
                error!(error = %err, "Admin update failed");
            }
        }
    });

    StatusCode::OK
}

async fn tenant_update(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(update): Json<Update>,
) -> StatusCode {
    let ctx = match state.registry.resolve(&token).await {
        Ok(Some(ctx)) => ctx,
        Ok(None) => return StatusCode::NOT_FOUND,
        Err(err) => {
            error!(error = %err, "Tenant resolution failed");
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    log_webhook_update("tenant", Some(ctx.bot_id), update.id.0);

    tokio::spawn(async move {
        if let Err(err) = handlers::client::handle_update(&state, &ctx, update).await {
            if err.is_domain() {
                warn!(bot_id = ctx.bot_id, error = %err, "Client update rejected");
            } else {
                error!(bot_id = ctx.bot_id, error = %err, "Client update failed");
            }
        }
    });

    StatusCode::OK
}
