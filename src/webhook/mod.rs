//! Webhook module
//!
//! One HTTP server receives every Telegram callback: a fixed path for the
//! admin bot and a token-parameterized path multiplexing all tenant bots.

pub mod registry;
pub mod router;

pub use registry::{MultibotRegistry, TenantContext};
pub use router::{build_router, AppState};
