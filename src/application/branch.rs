//! Branch use cases

use tracing::info;

use crate::application::interfaces::{BranchReader, BranchSaver, Committer};
use crate::models::{Branch, NewBranch};
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct CreateBranchDto {
    pub city_id: i64,
    pub name: String,
    pub address: String,
}

pub struct CreateBranch<G> {
    gateway: G,
}

impl<G: Committer + BranchSaver> CreateBranch<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: CreateBranchDto) -> Result<i64> {
        let branch_id = self
            .gateway
            .save_branch(&NewBranch {
                name: data.name,
                address: data.address,
                city_id: data.city_id,
            })
            .await?;
        self.gateway.commit().await?;
        info!(branch_id = branch_id, city_id = data.city_id, "Branch created");
        Ok(branch_id)
    }
}

#[derive(Debug, Clone)]
pub struct GetBranchDto {
    pub branch_id: i64,
}

pub struct GetBranch<G> {
    gateway: G,
}

impl<G: BranchReader> GetBranch<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: GetBranchDto) -> Result<Branch> {
        self.gateway.get_branch(data.branch_id).await
    }
}

#[derive(Debug, Clone)]
pub struct UpdateBranchDto {
    pub branch_id: i64,
    pub name: Option<String>,
    pub address: Option<String>,
}

pub struct UpdateBranch<G> {
    gateway: G,
}

impl<G: Committer + BranchSaver> UpdateBranch<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: UpdateBranchDto) -> Result<()> {
        if let Some(name) = data.name.as_deref() {
            self.gateway.update_branch_name(data.branch_id, name).await?;
        }
        if let Some(address) = data.address.as_deref() {
            self.gateway.update_branch_address(data.branch_id, address).await?;
        }
        self.gateway.commit().await
    }
}

#[derive(Debug, Clone)]
pub struct DeleteBranchDto {
    pub branch_id: i64,
}

pub struct DeleteBranch<G> {
    gateway: G,
}

impl<G: Committer + BranchSaver> DeleteBranch<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn execute(mut self, data: DeleteBranchDto) -> Result<()> {
        self.gateway.delete_branch(data.branch_id).await?;
        self.gateway.commit().await?;
        info!(branch_id = data.branch_id, "Branch deleted");
        Ok(())
    }
}
