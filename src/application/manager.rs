//! Manager use cases
//!
//! Registration and lookups for salon managers (owners of tenant bots).

use tracing::{debug, info};

use crate::application::interfaces::{Committer, ManagerReader, ManagerSaver};
use crate::models::{Bot, Manager};
use crate::utils::errors::{Result, SalonHubError};

#[derive(Debug, Clone)]
pub struct CreateManagerDto {
    pub telegram_id: i64,
}

/// Registers a manager by Telegram user id. Duplicate registration is
/// rejected, not silently accepted; callers treat the rejection as the
/// returning-user no-op.
pub struct CreateManager<G> {
    gateway: G,
}

impl<G: Committer + ManagerReader + ManagerSaver> CreateManager<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: CreateManagerDto) -> Result<i64> {
        match self.gateway.get_manager_by_telegram_id(data.telegram_id).await {
            Ok(_) => {
                return Err(SalonHubError::ManagerAlreadyExists {
                    telegram_id: data.telegram_id,
                })
            }
            Err(SalonHubError::ManagerTelegramIdNotFound { .. }) => {}
            Err(err) => return Err(err),
        }
        let manager_id = self.gateway.save_manager(data.telegram_id).await?;
        self.gateway.commit().await?;
        info!(manager_id = manager_id, telegram_id = data.telegram_id, "Manager registered");
        Ok(manager_id)
    }
}

/// Polymorphic lookup: primary id first, then telegram id.
#[derive(Debug, Clone, Default)]
pub struct GetManagerDto {
    pub manager_id: Option<i64>,
    pub telegram_id: Option<i64>,
}

pub struct GetManager<G> {
    gateway: G,
}

impl<G: ManagerReader> GetManager<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: GetManagerDto) -> Result<Manager> {
        if let Some(manager_id) = data.manager_id {
            self.gateway.get_manager(manager_id).await
        } else if let Some(telegram_id) = data.telegram_id {
            self.gateway.get_manager_by_telegram_id(telegram_id).await
        } else {
            Err(SalonHubError::InsufficientData)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetManagerBotsDto {
    pub manager_id: Option<i64>,
    pub telegram_id: Option<i64>,
}

pub struct GetManagerBots<G> {
    gateway: G,
}

impl<G: ManagerReader> GetManagerBots<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: GetManagerBotsDto) -> Result<Vec<Bot>> {
        if let Some(manager_id) = data.manager_id {
            self.gateway.get_manager_bots(manager_id).await
        } else if let Some(telegram_id) = data.telegram_id {
            debug!(telegram_id = telegram_id, "Resolving manager by telegram id for bot listing");
            let manager = self.gateway.get_manager_by_telegram_id(telegram_id).await?;
            self.gateway.get_manager_bots(manager.id).await
        } else {
            Err(SalonHubError::InsufficientData)
        }
    }
}
