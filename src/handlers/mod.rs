//! Bot handlers module
//!
//! Thin Telegram-facing layer: extract identifiers and text from an update,
//! hold the per-chat event lock, run the matching interactor, reply. All
//! business rules live in the application layer.

pub mod admin;
pub mod client;
