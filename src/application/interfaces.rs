//! Gateway capability contracts
//!
//! Each aggregate exposes a narrow read capability and a narrow write
//! capability as separate traits; a storage adapter implements them jointly.
//! Interactors declare dependency on exactly the combination they use, which
//! keeps unit-of-work boundaries out of entity code and lets tests substitute
//! in-memory fakes without a monolithic mock.
//!
//! All lookups return entity- and key-specific not-found errors, never a
//! generic one. Methods take `&mut self` because the production adapter runs
//! every capability against one transaction per inbound update.

use async_trait::async_trait;

use crate::models::{
    AvailableBranch, AvailableService, Bot, Branch, City, Client, Manager, Master, NewBot,
    NewBranch, NewCity, NewClient, NewMaster, NewService, Service, TimeZone,
};
use crate::utils::errors::Result;

/// Unit-of-work boundary, composed in by any interactor that mutates state.
#[async_trait]
pub trait Committer {
    async fn commit(&mut self) -> Result<()>;
}

#[async_trait]
pub trait BotReader {
    async fn get_bot(&mut self, bot_id: i64) -> Result<Bot>;
    async fn get_bot_by_token(&mut self, token: &str) -> Result<Bot>;
    async fn get_bot_by_telegram_id(&mut self, telegram_id: i64) -> Result<Bot>;
    async fn get_bots_by_manager_id(&mut self, manager_id: i64) -> Result<Vec<Bot>>;
    async fn get_bot_cities(&mut self, bot_id: i64) -> Result<Vec<City>>;
    async fn get_bot_services(&mut self, bot_id: i64) -> Result<Vec<Service>>;
    async fn get_bot_branches(&mut self, bot_id: i64) -> Result<Vec<Branch>>;
    async fn get_bot_masters(&mut self, bot_id: i64) -> Result<Vec<Master>>;
}

#[async_trait]
pub trait BotSaver {
    async fn save_bot(&mut self, bot: &NewBot) -> Result<i64>;
}

#[async_trait]
pub trait ManagerReader {
    async fn get_manager(&mut self, manager_id: i64) -> Result<Manager>;
    async fn get_manager_by_telegram_id(&mut self, telegram_id: i64) -> Result<Manager>;
    async fn get_manager_bots(&mut self, manager_id: i64) -> Result<Vec<Bot>>;
}

#[async_trait]
pub trait ManagerSaver {
    async fn save_manager(&mut self, telegram_id: i64) -> Result<i64>;
}

#[async_trait]
pub trait CityReader {
    async fn get_city(&mut self, city_id: i64) -> Result<City>;
    async fn get_city_branches(&mut self, city_id: i64) -> Result<Vec<Branch>>;
}

#[async_trait]
pub trait CitySaver {
    async fn save_city(&mut self, city: &NewCity) -> Result<i64>;
    async fn update_city_name(&mut self, city_id: i64, name: &str) -> Result<()>;
    async fn update_city_timezone(&mut self, city_id: i64, timezone: TimeZone) -> Result<()>;
    async fn delete_city(&mut self, city_id: i64) -> Result<()>;
}

#[async_trait]
pub trait BranchReader {
    async fn get_branch(&mut self, branch_id: i64) -> Result<Branch>;
}

#[async_trait]
pub trait BranchSaver {
    async fn save_branch(&mut self, branch: &NewBranch) -> Result<i64>;
    async fn update_branch_name(&mut self, branch_id: i64, name: &str) -> Result<()>;
    async fn update_branch_address(&mut self, branch_id: i64, address: &str) -> Result<()>;
    async fn delete_branch(&mut self, branch_id: i64) -> Result<()>;
}

#[async_trait]
pub trait ServiceReader {
    async fn get_service(&mut self, service_id: i64) -> Result<Service>;
}

#[async_trait]
pub trait ServiceSaver {
    async fn save_service(&mut self, service: &NewService) -> Result<i64>;
    async fn update_service_name(&mut self, service_id: i64, name: &str) -> Result<()>;
    async fn update_service_description(&mut self, service_id: i64, description: &str) -> Result<()>;
    async fn delete_service(&mut self, service_id: i64) -> Result<()>;
}

#[async_trait]
pub trait MasterReader {
    async fn get_master(&mut self, master_id: i64) -> Result<Master>;
    async fn get_available_branches(
        &mut self,
        bot_id: i64,
        master_id: i64,
    ) -> Result<Vec<AvailableBranch>>;
    async fn get_available_services(
        &mut self,
        bot_id: i64,
        master_id: i64,
    ) -> Result<Vec<AvailableService>>;
    async fn check_master_attached_to_branch(
        &mut self,
        master_id: i64,
        branch_id: i64,
    ) -> Result<bool>;
    async fn check_master_provides_service(
        &mut self,
        master_id: i64,
        service_id: i64,
    ) -> Result<bool>;
}

#[async_trait]
pub trait MasterSaver {
    async fn save_master(&mut self, master: &NewMaster) -> Result<i64>;
    async fn update_master_name(&mut self, master_id: i64, name: &str) -> Result<()>;
    async fn attach_master_to_branch(&mut self, master_id: i64, branch_id: i64) -> Result<()>;
    async fn detach_master_from_branch(&mut self, master_id: i64, branch_id: i64) -> Result<()>;
    async fn master_provide_service(&mut self, master_id: i64, service_id: i64) -> Result<()>;
    async fn master_withhold_service(&mut self, master_id: i64, service_id: i64) -> Result<()>;
    async fn update_master_work_time(
        &mut self,
        master_id: i64,
        service_id: i64,
        work_time: i32,
    ) -> Result<()>;
    async fn update_master_break_time(
        &mut self,
        master_id: i64,
        service_id: i64,
        break_time: i32,
    ) -> Result<()>;
    async fn delete_master(&mut self, master_id: i64) -> Result<()>;
}

#[async_trait]
pub trait ClientReader {
    async fn get_client(&mut self, client_id: i64) -> Result<Client>;
    async fn get_client_by_telegram_id(&mut self, bot_id: i64, telegram_id: i64) -> Result<Client>;
}

#[async_trait]
pub trait ClientSaver {
    async fn save_client(&mut self, client: &NewClient) -> Result<i64>;
}
