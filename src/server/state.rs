use std::sync::Arc;
use anyhow::Error;
use log::info;
use crate::model::{Appetizer, Drink, MainCourse};
use crate::server::config::ServerConfig;
use crate::server::database::pool::Pool;
use crate::server::repository::memory::{
    MemoryCashierRepository, MemoryProbe, MemoryProductRepository, MemoryUserRepository,
};
use crate::server::repository::postgres::{
    PgCashierRepository, PgPools, PgProbe, PgProductRepository, PgUserRepository,
};
use crate::server::repository::{CashierRepository, DatabaseProbe, ProductRepository, UserRepository};
use crate::server::security::PasswordEncoder;

/// Shared by every worker, cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    appetizers: Arc<dyn ProductRepository<Appetizer>>,
    drinks: Arc<dyn ProductRepository<Drink>>,
    main_courses: Arc<dyn ProductRepository<MainCourse>>,
    cashiers: Arc<dyn CashierRepository>,
    users: Arc<dyn UserRepository>,
    database: Arc<dyn DatabaseProbe>,
    passwords: PasswordEncoder,
}

impl AppState {
    /// State backed by process memory, empty on start.
    pub fn in_memory() -> Self {
        Self {
            appetizers: Arc::new(MemoryProductRepository::new()),
            drinks: Arc::new(MemoryProductRepository::new()),
            main_courses: Arc::new(MemoryProductRepository::new()),
            cashiers: Arc::new(MemoryCashierRepository::default()),
            users: Arc::new(MemoryUserRepository::default()),
            database: Arc::new(MemoryProbe),
            passwords: PasswordEncoder,
        }
    }

    /// State backed by PostgreSQL, reads go to the read pool and writes to the write pool.
    pub async fn postgres(config: &ServerConfig) -> Result<Self, Error> {
        let (read, write) = (
            Pool::connect("read", &config.db_read_conn_str, config.pool_size, config.db_timeout).await?,
            Pool::connect("write", &config.db_write_conn_str, config.pool_size, config.db_timeout).await?,
        );
        info!("db pools ready, read={} write={}", read.idle(), write.idle());
        let pools = PgPools { read, write, timeout: config.db_timeout };
        Ok(Self {
            appetizers: Arc::new(PgProductRepository::new(pools.clone())),
            drinks: Arc::new(PgProductRepository::new(pools.clone())),
            main_courses: Arc::new(PgProductRepository::new(pools.clone())),
            cashiers: Arc::new(PgCashierRepository::new(pools.clone())),
            users: Arc::new(PgUserRepository::new(pools.clone())),
            database: Arc::new(PgProbe::new(pools, &config.db_read_conn_str)),
            passwords: PasswordEncoder,
        })
    }

    /// Swap the database health check, the repositories stay as they are.
    pub fn with_database(mut self, database: Arc<dyn DatabaseProbe>) -> Self {
        self.database = database;
        self
    }

    pub fn appetizers(&self) -> &dyn ProductRepository<Appetizer> {
        self.appetizers.as_ref()
    }

    pub fn drinks(&self) -> &dyn ProductRepository<Drink> {
        self.drinks.as_ref()
    }

    pub fn main_courses(&self) -> &dyn ProductRepository<MainCourse> {
        self.main_courses.as_ref()
    }

    pub fn cashiers(&self) -> &dyn CashierRepository {
        self.cashiers.as_ref()
    }

    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    pub fn database(&self) -> &dyn DatabaseProbe {
        self.database.as_ref()
    }

    pub fn passwords(&self) -> &PasswordEncoder {
        &self.passwords
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{MenuItem, ProductFields};

    #[actix_web::test]
    async fn clones_share_repositories() {
        let state = AppState::in_memory();
        let clone = state.clone();
        clone
            .drinks()
            .insert(Drink::from_fields(ProductFields::new(None, "Water", 1)))
            .await
            .unwrap();
        assert_eq!(state.drinks().find_all().await.unwrap().len(), 1);
        assert!(state.appetizers().find_all().await.unwrap().is_empty());
    }
}
