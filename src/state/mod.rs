//! Conversation state module
//!
//! Redis-backed conversation context for multi-step dialogs, keyed per bot
//! and chat so the same person talking to two tenant bots holds two
//! independent conversations. Also hosts the per-chat event lock that
//! serializes webhook deliveries.

pub mod context;
pub mod isolation;
pub mod storage;

pub use context::ConversationContext;
pub use isolation::{EventIsolation, EventLock};
pub use storage::StateStorage;
