//! Database module
//!
//! Connection pool management and the Postgres gateway implementing the
//! application-layer capability contracts.

pub mod connection;
pub mod gateway;

pub use connection::{create_pool, health_check, run_migrations, DatabaseConfig, DatabasePool};
pub use gateway::{GatewayFactory, PgGateway};
