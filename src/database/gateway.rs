//! Postgres gateway
//!
//! One `PgGateway` per inbound update: it owns a single transaction and
//! implements every capability contract jointly, so an interactor can take it
//! as whatever trait combination it declares. Row-absent results are
//! translated into the entity- and key-specific not-found variants here and
//! nowhere else. Cascade and set-null rules live in the schema's foreign-key
//! actions, not in this code.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::application::interfaces::{
    BotReader, BotSaver, BranchReader, BranchSaver, CityReader, CitySaver, ClientReader,
    ClientSaver, Committer, ManagerReader, ManagerSaver, MasterReader, MasterSaver, ServiceReader,
    ServiceSaver,
};
use crate::models::{
    AvailableBranch, AvailableService, Bot, Branch, City, Client, Manager, Master, NewBot,
    NewBranch, NewCity, NewClient, NewMaster, NewService, Service, TimeZone,
};
use crate::utils::errors::{Result, SalonHubError};

/// Hands out one gateway (one transaction) per inbound update.
#[derive(Debug, Clone)]
pub struct GatewayFactory {
    pool: PgPool,
}

impl GatewayFactory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn begin(&self) -> Result<PgGateway> {
        PgGateway::begin(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Storage adapter over one Postgres transaction.
pub struct PgGateway {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgGateway {
    pub async fn begin(pool: &PgPool) -> Result<Self> {
        Ok(Self { tx: Some(pool.begin().await?) })
    }

    fn conn(&mut self) -> Result<&mut PgConnection> {
        self.tx.as_deref_mut().ok_or(SalonHubError::TransactionClosed)
    }
}

impl std::fmt::Debug for PgGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgGateway")
            .field("committed", &self.tx.is_none())
            .finish()
    }
}

#[async_trait]
impl Committer for PgGateway {
    async fn commit(&mut self) -> Result<()> {
        let tx = self.tx.take().ok_or(SalonHubError::TransactionClosed)?;
        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl BotReader for PgGateway {
    async fn get_bot(&mut self, bot_id: i64) -> Result<Bot> {
        let bot = sqlx::query_as::<_, Bot>(
            "SELECT id, token, telegram_id, name, manager_id, created_at FROM bots WHERE id = $1",
        )
        .bind(bot_id)
        .fetch_optional(self.conn()?)
        .await?;

        bot.ok_or(SalonHubError::BotIdNotFound { bot_id })
    }

    async fn get_bot_by_token(&mut self, token: &str) -> Result<Bot> {
        let bot = sqlx::query_as::<_, Bot>(
            "SELECT id, token, telegram_id, name, manager_id, created_at FROM bots WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(self.conn()?)
        .await?;

        bot.ok_or(SalonHubError::BotTokenNotFound)
    }

    async fn get_bot_by_telegram_id(&mut self, telegram_id: i64) -> Result<Bot> {
        let bot = sqlx::query_as::<_, Bot>(
            "SELECT id, token, telegram_id, name, manager_id, created_at FROM bots WHERE telegram_id = $1",
        )
        .bind(telegram_id)
        .fetch_optional(self.conn()?)
        .await?;

        bot.ok_or(SalonHubError::BotTelegramIdNotFound { telegram_id })
    }

    async fn get_bots_by_manager_id(&mut self, manager_id: i64) -> Result<Vec<Bot>> {
        let bots = sqlx::query_as::<_, Bot>(
            "SELECT id, token, telegram_id, name, manager_id, created_at FROM bots WHERE manager_id = $1 ORDER BY id",
        )
        .bind(manager_id)
        .fetch_all(self.conn()?)
        .await?;

        Ok(bots)
    }

    async fn get_bot_cities(&mut self, bot_id: i64) -> Result<Vec<City>> {
        let cities = sqlx::query_as::<_, City>(
            "SELECT id, name, timezone, bot_id FROM cities WHERE bot_id = $1 ORDER BY id",
        )
        .bind(bot_id)
        .fetch_all(self.conn()?)
        .await?;

        Ok(cities)
    }

    async fn get_bot_services(&mut self, bot_id: i64) -> Result<Vec<Service>> {
        let services = sqlx::query_as::<_, Service>(
            "SELECT id, name, description, bot_id FROM services WHERE bot_id = $1 ORDER BY id",
        )
        .bind(bot_id)
        .fetch_all(self.conn()?)
        .await?;

        Ok(services)
    }

    async fn get_bot_branches(&mut self, bot_id: i64) -> Result<Vec<Branch>> {
        let branches = sqlx::query_as::<_, Branch>(
            r#"
            SELECT b.id, b.name, b.address, b.city_id
            FROM branches b
            JOIN cities c ON c.id = b.city_id
            WHERE c.bot_id = $1
            ORDER BY b.id
            "#,
        )
        .bind(bot_id)
        .fetch_all(self.conn()?)
        .await?;

        Ok(branches)
    }

    async fn get_bot_masters(&mut self, bot_id: i64) -> Result<Vec<Master>> {
        let masters = sqlx::query_as::<_, Master>(
            "SELECT id, name, bot_id, city_id FROM masters WHERE bot_id = $1 ORDER BY id",
        )
        .bind(bot_id)
        .fetch_all(self.conn()?)
        .await?;

        Ok(masters)
    }
}

#[async_trait]
impl BotSaver for PgGateway {
    async fn save_bot(&mut self, bot: &NewBot) -> Result<i64> {
        let bot_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO bots (token, telegram_id, name, manager_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&bot.token)
        .bind(bot.telegram_id)
        .bind(&bot.name)
        .bind(bot.manager_id)
        .fetch_one(self.conn()?)
        .await?;

        Ok(bot_id)
    }
}

#[async_trait]
impl ManagerReader for PgGateway {
    async fn get_manager(&mut self, manager_id: i64) -> Result<Manager> {
        let manager = sqlx::query_as::<_, Manager>(
            "SELECT id, telegram_id, created_at FROM managers WHERE id = $1",
        )
        .bind(manager_id)
        .fetch_optional(self.conn()?)
        .await?;

        manager.ok_or(SalonHubError::ManagerIdNotFound { manager_id })
    }

    async fn get_manager_by_telegram_id(&mut self, telegram_id: i64) -> Result<Manager> {
        let manager = sqlx::query_as::<_, Manager>(
            "SELECT id, telegram_id, created_at FROM managers WHERE telegram_id = $1",
        )
        .bind(telegram_id)
        .fetch_optional(self.conn()?)
        .await?;

        manager.ok_or(SalonHubError::ManagerTelegramIdNotFound { telegram_id })
    }

    async fn get_manager_bots(&mut self, manager_id: i64) -> Result<Vec<Bot>> {
        self.get_bots_by_manager_id(manager_id).await
    }
}

#[async_trait]
impl ManagerSaver for PgGateway {
    async fn save_manager(&mut self, telegram_id: i64) -> Result<i64> {
        let manager_id: i64 = sqlx::query_scalar(
            "INSERT INTO managers (telegram_id) VALUES ($1) RETURNING id",
        )
        .bind(telegram_id)
        .fetch_one(self.conn()?)
        .await?;

        Ok(manager_id)
    }
}

#[async_trait]
impl CityReader for PgGateway {
    async fn get_city(&mut self, city_id: i64) -> Result<City> {
        let city = sqlx::query_as::<_, City>(
            "SELECT id, name, timezone, bot_id FROM cities WHERE id = $1",
        )
        .bind(city_id)
        .fetch_optional(self.conn()?)
        .await?;

        city.ok_or(SalonHubError::CityIdNotFound { city_id })
    }

    async fn get_city_branches(&mut self, city_id: i64) -> Result<Vec<Branch>> {
        let branches = sqlx::query_as::<_, Branch>(
            "SELECT id, name, address, city_id FROM branches WHERE city_id = $1 ORDER BY id",
        )
        .bind(city_id)
        .fetch_all(self.conn()?)
        .await?;

        Ok(branches)
    }
}

#[async_trait]
impl CitySaver for PgGateway {
    async fn save_city(&mut self, city: &NewCity) -> Result<i64> {
        let city_id: i64 = sqlx::query_scalar(
            "INSERT INTO cities (name, timezone, bot_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&city.name)
        .bind(city.timezone.as_str())
        .bind(city.bot_id)
        .fetch_one(self.conn()?)
        .await?;

        Ok(city_id)
    }

    async fn update_city_name(&mut self, city_id: i64, name: &str) -> Result<()> {
        sqlx::query("UPDATE cities SET name = $2 WHERE id = $1")
            .bind(city_id)
            .bind(name)
            .execute(self.conn()?)
            .await?;

        Ok(())
    }

    async fn update_city_timezone(&mut self, city_id: i64, timezone: TimeZone) -> Result<()> {
        sqlx::query("UPDATE cities SET timezone = $2 WHERE id = $1")
            .bind(city_id)
            .bind(timezone.as_str())
            .execute(self.conn()?)
            .await?;

        Ok(())
    }

    async fn delete_city(&mut self, city_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(city_id)
            .execute(self.conn()?)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl BranchReader for PgGateway {
    async fn get_branch(&mut self, branch_id: i64) -> Result<Branch> {
        let branch = sqlx::query_as::<_, Branch>(
            "SELECT id, name, address, city_id FROM branches WHERE id = $1",
        )
        .bind(branch_id)
        .fetch_optional(self.conn()?)
        .await?;

        branch.ok_or(SalonHubError::BranchIdNotFound { branch_id })
    }
}

#[async_trait]
impl BranchSaver for PgGateway {
    async fn save_branch(&mut self, branch: &NewBranch) -> Result<i64> {
        let branch_id: i64 = sqlx::query_scalar(
            "INSERT INTO branches (name, address, city_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&branch.name)
        .bind(&branch.address)
        .bind(branch.city_id)
        .fetch_one(self.conn()?)
        .await?;

        Ok(branch_id)
    }

    async fn update_branch_name(&mut self, branch_id: i64, name: &str) -> Result<()> {
        sqlx::query("UPDATE branches SET name = $2 WHERE id = $1")
            .bind(branch_id)
            .bind(name)
            .execute(self.conn()?)
            .await?;

        Ok(())
    }

    async fn update_branch_address(&mut self, branch_id: i64, address: &str) -> Result<()> {
        sqlx::query("UPDATE branches SET address = $2 WHERE id = $1")
            .bind(branch_id)
            .bind(address)
            .execute(self.conn()?)
            .await?;

        Ok(())
    }

    async fn delete_branch(&mut self, branch_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM branches WHERE id = $1")
            .bind(branch_id)
            .execute(self.conn()?)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl ServiceReader for PgGateway {
    async fn get_service(&mut self, service_id: i64) -> Result<Service> {
        let service = sqlx::query_as::<_, Service>(
            "SELECT id, name, description, bot_id FROM services WHERE id = $1",
        )
        .bind(service_id)
        .fetch_optional(self.conn()?)
        .await?;

        service.ok_or(SalonHubError::ServiceIdNotFound { service_id })
    }
}

#[async_trait]
impl ServiceSaver for PgGateway {
    async fn save_service(&mut self, service: &NewService) -> Result<i64> {
        let service_id: i64 = sqlx::query_scalar(
            "INSERT INTO services (name, description, bot_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.bot_id)
        .fetch_one(self.conn()?)
        .await?;

        Ok(service_id)
    }

    async fn update_service_name(&mut self, service_id: i64, name: &str) -> Result<()> {
        sqlx::query("UPDATE services SET name = $2 WHERE id = $1")
            .bind(service_id)
            .bind(name)
            .execute(self.conn()?)
            .await?;

        Ok(())
    }

    async fn update_service_description(
        &mut self,
        service_id: i64,
        description: &str,
    ) -> Result<()> {
        sqlx::query("UPDATE services SET description = $2 WHERE id = $1")
            .bind(service_id)
            .bind(description)
            .execute(self.conn()?)
            .await?;

        Ok(())
    }

    async fn delete_service(&mut self, service_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(service_id)
            .execute(self.conn()?)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl MasterReader for PgGateway {
    async fn get_master(&mut self, master_id: i64) -> Result<Master> {
        let master = sqlx::query_as::<_, Master>(
            "SELECT id, name, bot_id, city_id FROM masters WHERE id = $1",
        )
        .bind(master_id)
        .fetch_optional(self.conn()?)
        .await?;

        master.ok_or(SalonHubError::MasterIdNotFound { master_id })
    }

    async fn get_available_branches(
        &mut self,
        bot_id: i64,
        master_id: i64,
    ) -> Result<Vec<AvailableBranch>> {
        // Union of two disjoint partitions: every branch of the bot appears
        // exactly once, tagged with the association flag.
        let branches = sqlx::query_as::<_, AvailableBranch>(
            r#"
            SELECT b.id, b.name, b.address, b.city_id, TRUE AS is_associated
            FROM branches b
            JOIN cities c ON c.id = b.city_id
            JOIN branch_master_association a ON a.branch_id = b.id
            WHERE c.bot_id = $1 AND a.master_id = $2
            UNION ALL
            SELECT b.id, b.name, b.address, b.city_id, FALSE AS is_associated
            FROM branches b
            JOIN cities c ON c.id = b.city_id
            WHERE c.bot_id = $1
              AND NOT EXISTS (
                SELECT 1 FROM branch_master_association a
                WHERE a.branch_id = b.id AND a.master_id = $2
              )
            ORDER BY id
            "#,
        )
        .bind(bot_id)
        .bind(master_id)
        .fetch_all(self.conn()?)
        .await?;

        Ok(branches)
    }

    async fn get_available_services(
        &mut self,
        bot_id: i64,
        master_id: i64,
    ) -> Result<Vec<AvailableService>> {
        let services = sqlx::query_as::<_, AvailableService>(
            r#"
            SELECT s.id, s.name, s.description, s.bot_id, TRUE AS is_associated
            FROM services s
            JOIN service_master_association a ON a.service_id = s.id
            WHERE s.bot_id = $1 AND a.master_id = $2
            UNION ALL
            SELECT s.id, s.name, s.description, s.bot_id, FALSE AS is_associated
            FROM services s
            WHERE s.bot_id = $1
              AND NOT EXISTS (
                SELECT 1 FROM service_master_association a
                WHERE a.service_id = s.id AND a.master_id = $2
              )
            ORDER BY id
            "#,
        )
        .bind(bot_id)
        .bind(master_id)
        .fetch_all(self.conn()?)
        .await?;

        Ok(services)
    }

    async fn check_master_attached_to_branch(
        &mut self,
        master_id: i64,
        branch_id: i64,
    ) -> Result<bool> {
        let attached: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM branch_master_association
                WHERE master_id = $1 AND branch_id = $2
            )
            "#,
        )
        .bind(master_id)
        .bind(branch_id)
        .fetch_one(self.conn()?)
        .await?;

        Ok(attached)
    }

    async fn check_master_provides_service(
        &mut self,
        master_id: i64,
        service_id: i64,
    ) -> Result<bool> {
        let provides: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM service_master_association
                WHERE master_id = $1 AND service_id = $2
            )
            "#,
        )
        .bind(master_id)
        .bind(service_id)
        .fetch_one(self.conn()?)
        .await?;

        Ok(provides)
    }
}

#[async_trait]
impl MasterSaver for PgGateway {
    async fn save_master(&mut self, master: &NewMaster) -> Result<i64> {
        let master_id: i64 = sqlx::query_scalar(
            "INSERT INTO masters (name, bot_id, city_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&master.name)
        .bind(master.bot_id)
        .bind(master.city_id)
        .fetch_one(self.conn()?)
        .await?;

        Ok(master_id)
    }

    async fn update_master_name(&mut self, master_id: i64, name: &str) -> Result<()> {
        sqlx::query("UPDATE masters SET name = $2 WHERE id = $1")
            .bind(master_id)
            .bind(name)
            .execute(self.conn()?)
            .await?;

        Ok(())
    }

    async fn attach_master_to_branch(&mut self, master_id: i64, branch_id: i64) -> Result<()> {
        sqlx::query("INSERT INTO branch_master_association (branch_id, master_id) VALUES ($1, $2)")
            .bind(branch_id)
            .bind(master_id)
            .execute(self.conn()?)
            .await?;

        Ok(())
    }

    async fn detach_master_from_branch(&mut self, master_id: i64, branch_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM branch_master_association WHERE branch_id = $1 AND master_id = $2")
            .bind(branch_id)
            .bind(master_id)
            .execute(self.conn()?)
            .await?;

        Ok(())
    }

    async fn master_provide_service(&mut self, master_id: i64, service_id: i64) -> Result<()> {
        // Fresh associations start with zeroed timings; UpdateMaster sets
        // them once the pair exists.
        sqlx::query(
            r#"
            INSERT INTO service_master_association (service_id, master_id, work_time, break_time)
            VALUES ($1, $2, 0, 0)
            "#,
        )
        .bind(service_id)
        .bind(master_id)
        .execute(self.conn()?)
        .await?;

        Ok(())
    }

    async fn master_withhold_service(&mut self, master_id: i64, service_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM service_master_association WHERE service_id = $1 AND master_id = $2")
            .bind(service_id)
            .bind(master_id)
            .execute(self.conn()?)
            .await?;

        Ok(())
    }

    async fn update_master_work_time(
        &mut self,
        master_id: i64,
        service_id: i64,
        work_time: i32,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE service_master_association SET work_time = $3 WHERE master_id = $1 AND service_id = $2",
        )
        .bind(master_id)
        .bind(service_id)
        .bind(work_time)
        .execute(self.conn()?)
        .await?;

        Ok(())
    }

    async fn update_master_break_time(
        &mut self,
        master_id: i64,
        service_id: i64,
        break_time: i32,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE service_master_association SET break_time = $3 WHERE master_id = $1 AND service_id = $2",
        )
        .bind(master_id)
        .bind(service_id)
        .bind(break_time)
        .execute(self.conn()?)
        .await?;

        Ok(())
    }

    async fn delete_master(&mut self, master_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM masters WHERE id = $1")
            .bind(master_id)
            .execute(self.conn()?)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl ClientReader for PgGateway {
    async fn get_client(&mut self, client_id: i64) -> Result<Client> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, telegram_id, name, bot_id, city_id, created_at FROM clients WHERE id = $1",
        )
        .bind(client_id)
        .fetch_optional(self.conn()?)
        .await?;

        client.ok_or(SalonHubError::ClientIdNotFound { client_id })
    }

    async fn get_client_by_telegram_id(&mut self, bot_id: i64, telegram_id: i64) -> Result<Client> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, telegram_id, name, bot_id, city_id, created_at
            FROM clients
            WHERE bot_id = $1 AND telegram_id = $2
            "#,
        )
        .bind(bot_id)
        .bind(telegram_id)
        .fetch_optional(self.conn()?)
        .await?;

        client.ok_or(SalonHubError::ClientTelegramIdNotFound { bot_id, telegram_id })
    }
}

#[async_trait]
impl ClientSaver for PgGateway {
    async fn save_client(&mut self, client: &NewClient) -> Result<i64> {
        let client_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO clients (telegram_id, name, bot_id, city_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(client.telegram_id)
        .bind(&client.name)
        .bind(client.bot_id)
        .bind(client.city_id)
        .fetch_one(self.conn()?)
        .await?;

        Ok(client_id)
    }
}
