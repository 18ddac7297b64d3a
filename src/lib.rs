//! SalonHub Telegram Bot Platform
//!
//! Multi-tenant appointment booking for salons: one admin bot where managers
//! connect their salon bots, and a webhook server that multiplexes updates
//! for every connected tenant bot by the token in the request path.

#![allow(non_snake_case)]

pub mod application;
pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod state;
pub mod telegram;
pub mod utils;
pub mod webhook;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, SalonHubError};

pub use database::{GatewayFactory, PgGateway};
pub use state::{EventIsolation, StateStorage};
pub use webhook::{AppState, MultibotRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
