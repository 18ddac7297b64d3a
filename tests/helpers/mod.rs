//! Test helpers: an in-memory gateway implementing every capability trait
//! over a shared store, and a scripted Telegram API stub. The store is
//! shared via Arc so tests inspect state after an interactor consumed its
//! gateway.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use SalonHub::application::interfaces::{
    BotReader, BotSaver, BranchReader, BranchSaver, CityReader, CitySaver, ClientReader,
    ClientSaver, Committer, ManagerReader, ManagerSaver, MasterReader, MasterSaver, ServiceReader,
    ServiceSaver,
};
use SalonHub::models::{
    AvailableBranch, AvailableService, Bot, Branch, City, Client, Manager, Master, NewBot,
    NewBranch, NewCity, NewClient, NewMaster, NewService, Service, TimeZone,
};
use SalonHub::telegram::{BotApi, BotIdentity};
use SalonHub::utils::errors::{Result, SalonHubError};

#[derive(Debug, Default)]
pub struct Store {
    pub managers: Vec<Manager>,
    pub bots: Vec<Bot>,
    pub cities: Vec<City>,
    pub branches: Vec<Branch>,
    pub services: Vec<Service>,
    pub masters: Vec<Master>,
    pub clients: Vec<Client>,
    /// (branch_id, master_id)
    pub branch_master: HashSet<(i64, i64)>,
    /// (service_id, master_id) -> (work_time, break_time)
    pub service_master: HashMap<(i64, i64), (i32, i32)>,
    pub next_id: i64,
    pub commits: u32,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn bot_branch_ids(&self, bot_id: i64) -> Vec<i64> {
        let city_ids: HashSet<i64> = self
            .cities
            .iter()
            .filter(|c| c.bot_id == bot_id)
            .map(|c| c.id)
            .collect();
        self.branches
            .iter()
            .filter(|b| city_ids.contains(&b.city_id))
            .map(|b| b.id)
            .collect()
    }
}

/// In-memory stand-in for the Postgres gateway. Cascade and set-null
/// behavior of the schema is replicated in the delete methods.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    pub store: Arc<Mutex<Store>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_manager(&self, telegram_id: i64) -> i64 {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        store.managers.push(Manager {
            id,
            telegram_id,
            created_at: Utc::now(),
        });
        id
    }

    pub fn seed_bot(&self, token: &str, telegram_id: i64, manager_id: i64) -> i64 {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        store.bots.push(Bot {
            id,
            token: token.to_string(),
            telegram_id,
            name: format!("bot-{id}"),
            manager_id,
            created_at: Utc::now(),
        });
        id
    }

    pub fn seed_city(&self, bot_id: i64, name: &str) -> i64 {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        store.cities.push(City {
            id,
            name: name.to_string(),
            timezone: TimeZone::EuropeMoscow,
            bot_id,
        });
        id
    }

    pub fn seed_branch(&self, city_id: i64, name: &str) -> i64 {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        store.branches.push(Branch {
            id,
            name: name.to_string(),
            address: format!("{name} street 1"),
            city_id,
        });
        id
    }

    pub fn seed_service(&self, bot_id: i64, name: &str) -> i64 {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        store.services.push(Service {
            id,
            name: name.to_string(),
            description: None,
            bot_id,
        });
        id
    }

    /// Replays the schema's FK actions for a bot row removal: cities,
    /// branches, services, masters and clients cascade, association rows go
    /// with their owners.
    pub fn delete_bot(&self, bot_id: i64) {
        let mut store = self.store.lock().unwrap();
        let city_ids: HashSet<i64> = store
            .cities
            .iter()
            .filter(|c| c.bot_id == bot_id)
            .map(|c| c.id)
            .collect();
        let branch_ids: HashSet<i64> = store
            .branches
            .iter()
            .filter(|b| city_ids.contains(&b.city_id))
            .map(|b| b.id)
            .collect();
        let service_ids: HashSet<i64> = store
            .services
            .iter()
            .filter(|s| s.bot_id == bot_id)
            .map(|s| s.id)
            .collect();
        let master_ids: HashSet<i64> = store
            .masters
            .iter()
            .filter(|m| m.bot_id == bot_id)
            .map(|m| m.id)
            .collect();

        store.bots.retain(|b| b.id != bot_id);
        store.cities.retain(|c| c.bot_id != bot_id);
        store.branches.retain(|b| !city_ids.contains(&b.city_id));
        store.services.retain(|s| s.bot_id != bot_id);
        store.masters.retain(|m| m.bot_id != bot_id);
        store.clients.retain(|c| c.bot_id != bot_id);
        store
            .branch_master
            .retain(|(bid, mid)| !branch_ids.contains(bid) && !master_ids.contains(mid));
        store
            .service_master
            .retain(|(sid, mid), _| !service_ids.contains(sid) && !master_ids.contains(mid));
    }

    pub fn seed_master(&self, bot_id: i64, city_id: i64, name: &str) -> i64 {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        store.masters.push(Master {
            id,
            name: name.to_string(),
            bot_id,
            city_id: Some(city_id),
        });
        id
    }
}

#[async_trait]
impl Committer for InMemoryGateway {
    async fn commit(&mut self) -> Result<()> {
        self.store.lock().unwrap().commits += 1;
        Ok(())
    }
}

#[async_trait]
impl BotReader for InMemoryGateway {
    async fn get_bot(&mut self, bot_id: i64) -> Result<Bot> {
        let store = self.store.lock().unwrap();
        store
            .bots
            .iter()
            .find(|b| b.id == bot_id)
            .cloned()
            .ok_or(SalonHubError::BotIdNotFound { bot_id })
    }

    async fn get_bot_by_token(&mut self, token: &str) -> Result<Bot> {
        let store = self.store.lock().unwrap();
        store
            .bots
            .iter()
            .find(|b| b.token == token)
            .cloned()
            .ok_or(SalonHubError::BotTokenNotFound)
    }

    async fn get_bot_by_telegram_id(&mut self, telegram_id: i64) -> Result<Bot> {
        let store = self.store.lock().unwrap();
        store
            .bots
            .iter()
            .find(|b| b.telegram_id == telegram_id)
            .cloned()
            .ok_or(SalonHubError::BotTelegramIdNotFound { telegram_id })
    }

    async fn get_bots_by_manager_id(&mut self, manager_id: i64) -> Result<Vec<Bot>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .bots
            .iter()
            .filter(|b| b.manager_id == manager_id)
            .cloned()
            .collect())
    }

    async fn get_bot_cities(&mut self, bot_id: i64) -> Result<Vec<City>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .cities
            .iter()
            .filter(|c| c.bot_id == bot_id)
            .cloned()
            .collect())
    }

    async fn get_bot_services(&mut self, bot_id: i64) -> Result<Vec<Service>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .services
            .iter()
            .filter(|s| s.bot_id == bot_id)
            .cloned()
            .collect())
    }

    async fn get_bot_branches(&mut self, bot_id: i64) -> Result<Vec<Branch>> {
        let store = self.store.lock().unwrap();
        let branch_ids: HashSet<i64> = store.bot_branch_ids(bot_id).into_iter().collect();
        Ok(store
            .branches
            .iter()
            .filter(|b| branch_ids.contains(&b.id))
            .cloned()
            .collect())
    }

    async fn get_bot_masters(&mut self, bot_id: i64) -> Result<Vec<Master>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .masters
            .iter()
            .filter(|m| m.bot_id == bot_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BotSaver for InMemoryGateway {
    async fn save_bot(&mut self, bot: &NewBot) -> Result<i64> {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        store.bots.push(Bot {
            id,
            token: bot.token.clone(),
            telegram_id: bot.telegram_id,
            name: bot.name.clone(),
            manager_id: bot.manager_id,
            created_at: Utc::now(),
        });
        Ok(id)
    }
}

#[async_trait]
impl ManagerReader for InMemoryGateway {
    async fn get_manager(&mut self, manager_id: i64) -> Result<Manager> {
        let store = self.store.lock().unwrap();
        store
            .managers
            .iter()
            .find(|m| m.id == manager_id)
            .cloned()
            .ok_or(SalonHubError::ManagerIdNotFound { manager_id })
    }

    async fn get_manager_by_telegram_id(&mut self, telegram_id: i64) -> Result<Manager> {
        let store = self.store.lock().unwrap();
        store
            .managers
            .iter()
            .find(|m| m.telegram_id == telegram_id)
            .cloned()
            .ok_or(SalonHubError::ManagerTelegramIdNotFound { telegram_id })
    }

    async fn get_manager_bots(&mut self, manager_id: i64) -> Result<Vec<Bot>> {
        self.get_bots_by_manager_id(manager_id).await
    }
}

#[async_trait]
impl ManagerSaver for InMemoryGateway {
    async fn save_manager(&mut self, telegram_id: i64) -> Result<i64> {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        store.managers.push(Manager {
            id,
            telegram_id,
            created_at: Utc::now(),
        });
        Ok(id)
    }
}

#[async_trait]
impl CityReader for InMemoryGateway {
    async fn get_city(&mut self, city_id: i64) -> Result<City> {
        let store = self.store.lock().unwrap();
        store
            .cities
            .iter()
            .find(|c| c.id == city_id)
            .cloned()
            .ok_or(SalonHubError::CityIdNotFound { city_id })
    }

    async fn get_city_branches(&mut self, city_id: i64) -> Result<Vec<Branch>> {
        let store = self.store.lock().unwrap();
        Ok(store
            .branches
            .iter()
            .filter(|b| b.city_id == city_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CitySaver for InMemoryGateway {
    async fn save_city(&mut self, city: &NewCity) -> Result<i64> {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        store.cities.push(City {
            id,
            name: city.name.clone(),
            timezone: city.timezone,
            bot_id: city.bot_id,
        });
        Ok(id)
    }

    async fn update_city_name(&mut self, city_id: i64, name: &str) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        if let Some(city) = store.cities.iter_mut().find(|c| c.id == city_id) {
            city.name = name.to_string();
        }
        Ok(())
    }

    async fn update_city_timezone(&mut self, city_id: i64, timezone: TimeZone) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        if let Some(city) = store.cities.iter_mut().find(|c| c.id == city_id) {
            city.timezone = timezone;
        }
        Ok(())
    }

    async fn delete_city(&mut self, city_id: i64) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        let branch_ids: HashSet<i64> = store
            .branches
            .iter()
            .filter(|b| b.city_id == city_id)
            .map(|b| b.id)
            .collect();
        store.cities.retain(|c| c.id != city_id);
        store.branches.retain(|b| b.city_id != city_id);
        store.branch_master.retain(|(bid, _)| !branch_ids.contains(bid));
        for master in store.masters.iter_mut() {
            if master.city_id == Some(city_id) {
                master.city_id = None;
            }
        }
        for client in store.clients.iter_mut() {
            if client.city_id == Some(city_id) {
                client.city_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl BranchReader for InMemoryGateway {
    async fn get_branch(&mut self, branch_id: i64) -> Result<Branch> {
        let store = self.store.lock().unwrap();
        store
            .branches
            .iter()
            .find(|b| b.id == branch_id)
            .cloned()
            .ok_or(SalonHubError::BranchIdNotFound { branch_id })
    }
}

#[async_trait]
impl BranchSaver for InMemoryGateway {
    async fn save_branch(&mut self, branch: &NewBranch) -> Result<i64> {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        store.branches.push(Branch {
            id,
            name: branch.name.clone(),
            address: branch.address.clone(),
            city_id: branch.city_id,
        });
        Ok(id)
    }

    async fn update_branch_name(&mut self, branch_id: i64, name: &str) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        if let Some(branch) = store.branches.iter_mut().find(|b| b.id == branch_id) {
            branch.name = name.to_string();
        }
        Ok(())
    }

    async fn update_branch_address(&mut self, branch_id: i64, address: &str) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        if let Some(branch) = store.branches.iter_mut().find(|b| b.id == branch_id) {
            branch.address = address.to_string();
        }
        Ok(())
    }

    async fn delete_branch(&mut self, branch_id: i64) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        store.branches.retain(|b| b.id != branch_id);
        store.branch_master.retain(|(bid, _)| *bid != branch_id);
        Ok(())
    }
}

#[async_trait]
impl ServiceReader for InMemoryGateway {
    async fn get_service(&mut self, service_id: i64) -> Result<Service> {
        let store = self.store.lock().unwrap();
        store
            .services
            .iter()
            .find(|s| s.id == service_id)
            .cloned()
            .ok_or(SalonHubError::ServiceIdNotFound { service_id })
    }
}

#[async_trait]
impl ServiceSaver for InMemoryGateway {
    async fn save_service(&mut self, service: &NewService) -> Result<i64> {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        store.services.push(Service {
            id,
            name: service.name.clone(),
            description: service.description.clone(),
            bot_id: service.bot_id,
        });
        Ok(id)
    }

    async fn update_service_name(&mut self, service_id: i64, name: &str) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        if let Some(service) = store.services.iter_mut().find(|s| s.id == service_id) {
            service.name = name.to_string();
        }
        Ok(())
    }

    async fn update_service_description(
        &mut self,
        service_id: i64,
        description: &str,
    ) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        if let Some(service) = store.services.iter_mut().find(|s| s.id == service_id) {
            service.description = Some(description.to_string());
        }
        Ok(())
    }

    async fn delete_service(&mut self, service_id: i64) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        store.services.retain(|s| s.id != service_id);
        store.service_master.retain(|(sid, _), _| *sid != service_id);
        Ok(())
    }
}

#[async_trait]
impl MasterReader for InMemoryGateway {
    async fn get_master(&mut self, master_id: i64) -> Result<Master> {
        let store = self.store.lock().unwrap();
        store
            .masters
            .iter()
            .find(|m| m.id == master_id)
            .cloned()
            .ok_or(SalonHubError::MasterIdNotFound { master_id })
    }

    async fn get_available_branches(
        &mut self,
        bot_id: i64,
        master_id: i64,
    ) -> Result<Vec<AvailableBranch>> {
        let store = self.store.lock().unwrap();
        let branch_ids: HashSet<i64> = store.bot_branch_ids(bot_id).into_iter().collect();
        let mut out: Vec<AvailableBranch> = store
            .branches
            .iter()
            .filter(|b| branch_ids.contains(&b.id))
            .map(|b| AvailableBranch {
                id: b.id,
                name: b.name.clone(),
                address: b.address.clone(),
                city_id: b.city_id,
                is_associated: store.branch_master.contains(&(b.id, master_id)),
            })
            .collect();
        out.sort_by_key(|b| b.id);
        Ok(out)
    }

    async fn get_available_services(
        &mut self,
        bot_id: i64,
        master_id: i64,
    ) -> Result<Vec<AvailableService>> {
        let store = self.store.lock().unwrap();
        let mut out: Vec<AvailableService> = store
            .services
            .iter()
            .filter(|s| s.bot_id == bot_id)
            .map(|s| AvailableService {
                id: s.id,
                name: s.name.clone(),
                description: s.description.clone(),
                bot_id: s.bot_id,
                is_associated: store.service_master.contains_key(&(s.id, master_id)),
            })
            .collect();
        out.sort_by_key(|s| s.id);
        Ok(out)
    }

    async fn check_master_attached_to_branch(
        &mut self,
        master_id: i64,
        branch_id: i64,
    ) -> Result<bool> {
        let store = self.store.lock().unwrap();
        Ok(store.branch_master.contains(&(branch_id, master_id)))
    }

    async fn check_master_provides_service(
        &mut self,
        master_id: i64,
        service_id: i64,
    ) -> Result<bool> {
        let store = self.store.lock().unwrap();
        Ok(store.service_master.contains_key(&(service_id, master_id)))
    }
}

#[async_trait]
impl MasterSaver for InMemoryGateway {
    async fn save_master(&mut self, master: &NewMaster) -> Result<i64> {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        store.masters.push(Master {
            id,
            name: master.name.clone(),
            bot_id: master.bot_id,
            city_id: Some(master.city_id),
        });
        Ok(id)
    }

    async fn update_master_name(&mut self, master_id: i64, name: &str) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        if let Some(master) = store.masters.iter_mut().find(|m| m.id == master_id) {
            master.name = name.to_string();
        }
        Ok(())
    }

    async fn attach_master_to_branch(&mut self, master_id: i64, branch_id: i64) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        store.branch_master.insert((branch_id, master_id));
        Ok(())
    }

    async fn detach_master_from_branch(&mut self, master_id: i64, branch_id: i64) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        store.branch_master.remove(&(branch_id, master_id));
        Ok(())
    }

    async fn master_provide_service(&mut self, master_id: i64, service_id: i64) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        store.service_master.insert((service_id, master_id), (0, 0));
        Ok(())
    }

    async fn master_withhold_service(&mut self, master_id: i64, service_id: i64) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        store.service_master.remove(&(service_id, master_id));
        Ok(())
    }

    async fn update_master_work_time(
        &mut self,
        master_id: i64,
        service_id: i64,
        work_time: i32,
    ) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        if let Some(times) = store.service_master.get_mut(&(service_id, master_id)) {
            times.0 = work_time;
        }
        Ok(())
    }

    async fn update_master_break_time(
        &mut self,
        master_id: i64,
        service_id: i64,
        break_time: i32,
    ) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        if let Some(times) = store.service_master.get_mut(&(service_id, master_id)) {
            times.1 = break_time;
        }
        Ok(())
    }

    async fn delete_master(&mut self, master_id: i64) -> Result<()> {
        let mut store = self.store.lock().unwrap();
        store.masters.retain(|m| m.id != master_id);
        store.branch_master.retain(|(_, mid)| *mid != master_id);
        store.service_master.retain(|(_, mid), _| *mid != master_id);
        Ok(())
    }
}

#[async_trait]
impl ClientReader for InMemoryGateway {
    async fn get_client(&mut self, client_id: i64) -> Result<Client> {
        let store = self.store.lock().unwrap();
        store
            .clients
            .iter()
            .find(|c| c.id == client_id)
            .cloned()
            .ok_or(SalonHubError::ClientIdNotFound { client_id })
    }

    async fn get_client_by_telegram_id(&mut self, bot_id: i64, telegram_id: i64) -> Result<Client> {
        let store = self.store.lock().unwrap();
        store
            .clients
            .iter()
            .find(|c| c.bot_id == bot_id && c.telegram_id == telegram_id)
            .cloned()
            .ok_or(SalonHubError::ClientTelegramIdNotFound { bot_id, telegram_id })
    }
}

#[async_trait]
impl ClientSaver for InMemoryGateway {
    async fn save_client(&mut self, client: &NewClient) -> Result<i64> {
        let mut store = self.store.lock().unwrap();
        let id = store.next_id();
        store.clients.push(Client {
            id,
            telegram_id: client.telegram_id,
            name: client.name.clone(),
            bot_id: client.bot_id,
            city_id: Some(client.city_id),
            created_at: Utc::now(),
        });
        Ok(id)
    }
}

/// Scripted Telegram Bot API recording every call it receives.
#[derive(Clone)]
pub struct StubBotApi {
    pub identity: BotIdentity,
    pub reject_token: bool,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl StubBotApi {
    pub fn new(telegram_id: i64, name: &str) -> Self {
        Self {
            identity: BotIdentity {
                telegram_id,
                name: name.to_string(),
            },
            reject_token: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn rejecting() -> Self {
        let mut stub = Self::new(0, "rejected");
        stub.reject_token = true;
        stub
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BotApi for StubBotApi {
    async fn get_me(&self, _token: &str) -> Result<BotIdentity> {
        self.calls.lock().unwrap().push("get_me".to_string());
        if self.reject_token {
            return Err(SalonHubError::InvalidBotToken);
        }
        Ok(self.identity.clone())
    }

    async fn delete_webhook(&self, _token: &str, drop_pending_updates: bool) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("delete_webhook:{drop_pending_updates}"));
        Ok(())
    }

    async fn set_webhook(&self, _token: &str, url: &str) -> Result<()> {
        self.calls.lock().unwrap().push(format!("set_webhook:{url}"));
        Ok(())
    }
}
