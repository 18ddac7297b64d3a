//! City use cases

use tracing::info;

use crate::application::interfaces::{CityReader, CitySaver, Committer};
use crate::models::{Branch, City, NewCity, TimeZone};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct CreateCityDto {
    pub bot_id: i64,
    pub name: String,
    pub timezone: TimeZone,
}

pub struct CreateCity<G> {
    gateway: G,
}

impl<G: Committer + CitySaver> CreateCity<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: CreateCityDto) -> Result<i64> {
        let city_id = self
            .gateway
            .save_city(&NewCity {
                name: data.name,
                timezone: data.timezone,
                bot_id: data.bot_id,
            })
            .await?;
        self.gateway.commit().await?;
        info!(city_id = city_id, bot_id = data.bot_id, "City created");
        Ok(city_id)
    }
}

#[derive(Debug, Clone)]
pub struct GetCityDto {
    pub city_id: i64,
}

pub struct GetCity<G> {
    gateway: G,
}

impl<G: CityReader> GetCity<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: GetCityDto) -> Result<City> {
        self.gateway.get_city(data.city_id).await
    }
}

#[derive(Debug, Clone)]
pub struct GetCityBranchesDto {
    pub city_id: i64,
}

pub struct GetCityBranches<G> {
    gateway: G,
}

impl<G: CityReader> GetCityBranches<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: GetCityBranchesDto) -> Result<Vec<Branch>> {
        self.gateway.get_city_branches(data.city_id).await
    }
}

/// Field-specific update; all given fields are applied in one transaction.
#[derive(Debug, Clone)]
pub struct UpdateCityDto {
    pub city_id: i64,
    pub name: Option<String>,
    pub timezone: Option<TimeZone>,
}

pub struct UpdateCity<G> {
    gateway: G,
}

impl<G: Committer + CitySaver> UpdateCity<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: UpdateCityDto) -> Result<()> {
        if let Some(name) = data.name.as_deref() {
            self.gateway.update_city_name(data.city_id, name).await?;
        }
        if let Some(timezone) = data.timezone {
            self.gateway.update_city_timezone(data.city_id, timezone).await?;
        }
        self.gateway.commit().await
    }
}

/// Deletes the city; its branches go with it via the cascade rule enforced
/// by the storage layer.
#[derive(Debug, Clone)]
pub struct DeleteCityDto {
    pub city_id: i64,
}

pub struct DeleteCity<G> {
    gateway: G,
}

impl<G: Committer + CitySaver> DeleteCity<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: DeleteCityDto) -> Result<()> {
        self.gateway.delete_city(data.city_id).await?;
        self.gateway.commit().await?;
        info!(city_id = data.city_id, "City deleted");
        Ok(())
    }
}
