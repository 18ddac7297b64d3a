//! Service (offering) use cases

use tracing::info;

use crate::application::interfaces::{Committer, ServiceReader, ServiceSaver};
use crate::models::{NewService, Service};
use crate::utils::errors::{Result, SalonHubError};

#[derive(Debug, Clone)]
pub struct CreateServiceDto {
    pub bot_id: i64,
    pub name: String,
    pub description: Option<String>,
}

pub struct CreateService<G> {
    gateway: G,
}

impl<G: Committer + ServiceSaver> CreateService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: CreateServiceDto) -> Result<i64> {
        let service_id = self
            .gateway
            .save_service(&NewService {
                name: data.name,
                description: data.description,
                bot_id: data.bot_id,
            })
            .await?;
        self.gateway.commit().await?;
        info!(service_id = service_id, bot_id = data.bot_id, "Service created");
        Ok(service_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GetServiceDto {
    pub service_id: Option<i64>,
}

pub struct GetService<G> {
    gateway: G,
}

impl<G: ServiceReader> GetService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: GetServiceDto) -> Result<Service> {
        match data.service_id {
            Some(service_id) => self.gateway.get_service(service_id).await,
            None => Err(SalonHubError::InsufficientData),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateServiceDto {
    pub service_id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
}

pub struct UpdateService<G> {
    gateway: G,
}

impl<G: Committer + ServiceSaver> UpdateService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: UpdateServiceDto) -> Result<()> {
        if let Some(name) = data.name.as_deref() {
            self.gateway.update_service_name(data.service_id, name).await?;
        }
        if let Some(description) = data.description.as_deref() {
            self.gateway
                .update_service_description(data.service_id, description)
                .await?;
        }
        self.gateway.commit().await
    }
}

#[derive(Debug, Clone)]
pub struct DeleteServiceDto {
    pub service_id: i64,
}

pub struct DeleteService<G> {
    gateway: G,
}

impl<G: Committer + ServiceSaver> DeleteService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: DeleteServiceDto) -> Result<()> {
        self.gateway.delete_service(data.service_id).await?;
        self.gateway.commit().await?;
        info!(service_id = data.service_id, "Service deleted");
        Ok(())
    }
}
