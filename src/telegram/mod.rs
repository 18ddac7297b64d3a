//! Telegram Bot API seam
//!
//! The remote bot API is an external collaborator of the provisioning use
//! case: identity fetch plus webhook registration, nothing more.

pub mod api;
pub mod webhook_url;

pub use api::{BotApi, BotIdentity, TelegramBotApi};
pub use webhook_url::MultibotWebhookUrl;
