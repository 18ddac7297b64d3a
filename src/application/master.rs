//! Master use cases
//!
//! Masters are the staff members clients book. UpdateMaster carries the
//! branch/service association toggles; the availability queries partition a
//! bot's branches/services by whether the master is associated.

use tracing::info;

use crate::application::interfaces::{Committer, MasterReader, MasterSaver};
use crate::models::{AvailableBranch, AvailableService, Master, NewMaster};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct CreateMasterDto {
    pub name: String,
    pub bot_id: i64,
    pub city_id: i64,
}

pub struct CreateMaster<G> {
    gateway: G,
}

impl<G: Committer + MasterSaver> CreateMaster<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: CreateMasterDto) -> Result<i64> {
        let master_id = self
            .gateway
            .save_master(&NewMaster {
                name: data.name,
                bot_id: data.bot_id,
                city_id: data.city_id,
            })
            .await?;
        self.gateway.commit().await?;
        info!(master_id = master_id, bot_id = data.bot_id, "Master created");
        Ok(master_id)
    }
}

#[derive(Debug, Clone)]
pub struct GetMasterDto {
    pub master_id: i64,
}

pub struct GetMaster<G> {
    gateway: G,
}

impl<G: MasterReader> GetMaster<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: GetMasterDto) -> Result<Master> {
        self.gateway.get_master(data.master_id).await
    }
}

/// Work/break-time adjustment tied to one existing master-service pair.
#[derive(Debug, Clone)]
pub struct UpdateServiceTimeDto {
    pub service_id: i64,
    pub work_time: Option<i32>,
    pub break_time: Option<i32>,
}

/// All fields are independent and optional; whatever is present is applied
/// within one transaction. A given branch or service id is a pure toggle:
/// associated pairs are detached, missing pairs are attached.
#[derive(Debug, Clone, Default)]
pub struct UpdateMasterDto {
    pub master_id: i64,
    pub name: Option<String>,
    pub branch_id: Option<i64>,
    pub service_id: Option<i64>,
    pub service_time: Option<UpdateServiceTimeDto>,
}

pub struct UpdateMaster<G> {
    gateway: G,
}

impl<G: Committer + MasterReader + MasterSaver> UpdateMaster<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: UpdateMasterDto) -> Result<()> {
        if let Some(name) = data.name.as_deref() {
            self.gateway.update_master_name(data.master_id, name).await?;
        }
        if let Some(branch_id) = data.branch_id {
            let attached = self
                .gateway
                .check_master_attached_to_branch(data.master_id, branch_id)
                .await?;
            if attached {
                self.gateway
                    .detach_master_from_branch(data.master_id, branch_id)
                    .await?;
            } else {
                self.gateway
                    .attach_master_to_branch(data.master_id, branch_id)
                    .await?;
            }
        }
        if let Some(service_id) = data.service_id {
            let provides = self
                .gateway
                .check_master_provides_service(data.master_id, service_id)
                .await?;
            if provides {
                self.gateway
                    .master_withhold_service(data.master_id, service_id)
                    .await?;
            } else {
                self.gateway
                    .master_provide_service(data.master_id, service_id)
                    .await?;
            }
        }
        if let Some(service_time) = &data.service_time {
            if let Some(work_time) = service_time.work_time {
                self.gateway
                    .update_master_work_time(data.master_id, service_time.service_id, work_time)
                    .await?;
            }
            if let Some(break_time) = service_time.break_time {
                self.gateway
                    .update_master_break_time(data.master_id, service_time.service_id, break_time)
                    .await?;
            }
        }
        self.gateway.commit().await
    }
}

#[derive(Debug, Clone)]
pub struct DeleteMasterDto {
    pub master_id: i64,
}

pub struct DeleteMaster<G> {
    gateway: G,
}

impl<G: Committer + MasterSaver> DeleteMaster<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: DeleteMasterDto) -> Result<()> {
        self.gateway.delete_master(data.master_id).await?;
        self.gateway.commit().await?;
        info!(master_id = data.master_id, "Master deleted");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct GetMasterAvailableBranchesDto {
    pub bot_id: i64,
    pub master_id: i64,
}

/// Every branch of the bot exactly once, tagged with whether the master
/// currently works there.
pub struct GetMasterAvailableBranches<G> {
    gateway: G,
}

impl<G: MasterReader> GetMasterAvailableBranches<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(
        mut self,
        data: GetMasterAvailableBranchesDto,
    ) -> Result<Vec<AvailableBranch>> {
        self.gateway
            .get_available_branches(data.bot_id, data.master_id)
            .await
    }
}

#[derive(Debug, Clone)]
pub struct GetMasterAvailableServicesDto {
    pub bot_id: i64,
    pub master_id: i64,
}

/// Every service of the bot exactly once, tagged with whether the master
/// currently provides it.
pub struct GetMasterAvailableServices<G> {
    gateway: G,
}

impl<G: MasterReader> GetMasterAvailableServices<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(
        mut self,
        data: GetMasterAvailableServicesDto,
    ) -> Result<Vec<AvailableService>> {
        self.gateway
            .get_available_services(data.bot_id, data.master_id)
            .await
    }
}
