use std::collections::BTreeMap;
use std::marker::PhantomData;
use async_trait::async_trait;
use tokio::sync::Mutex;
use crate::model::{Cashier, MenuItem, Role};
use crate::server::repository::{
    CashierRepository, DatabaseInfo, DatabaseProbe, ProductRepository, RepositoryError, UserRecord,
    UserRepository,
};

/// Rows keyed by id, ids are never reused.
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { next_id: 1, rows: BTreeMap::new() }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

pub(crate) struct MemoryProductRepository<P> {
    table: Mutex<Table<P>>,
    _kind: PhantomData<fn() -> P>,
}

impl<P> MemoryProductRepository<P> {
    pub fn new() -> Self {
        Self { table: Mutex::new(Table::default()), _kind: PhantomData }
    }
}

#[async_trait]
impl<P: MenuItem> ProductRepository<P> for MemoryProductRepository<P> {
    async fn find_all(&self) -> Result<Vec<P>, RepositoryError> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<P>, RepositoryError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn insert(&self, mut item: P) -> Result<P, RepositoryError> {
        let mut table = self.table.lock().await;
        let id = table.allocate();
        item.set_id(Some(id));
        table.rows.insert(id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: i64, mut item: P) -> Result<Option<P>, RepositoryError> {
        let mut table = self.table.lock().await;
        match table.rows.get_mut(&id) {
            Some(row) => {
                item.set_id(Some(id));
                *row = item.clone();
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.lock().await.rows.remove(&id).is_some())
    }
}

#[derive(Default)]
pub(crate) struct MemoryCashierRepository {
    table: Mutex<Table<Cashier>>,
}

impl MemoryCashierRepository {
    fn name_taken(table: &Table<Cashier>, name: &str, except: Option<i64>) -> bool {
        table.rows.values().any(|c| c.name == name && c.id != except)
    }
}

#[async_trait]
impl CashierRepository for MemoryCashierRepository {
    async fn find_all(&self) -> Result<Vec<Cashier>, RepositoryError> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Cashier>, RepositoryError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Cashier>, RepositoryError> {
        Ok(self.table.lock().await.rows.values().find(|c| c.name == name).cloned())
    }

    async fn insert(&self, mut cashier: Cashier) -> Result<Cashier, RepositoryError> {
        let mut table = self.table.lock().await;
        if Self::name_taken(&table, &cashier.name, None) {
            return Err(RepositoryError::Conflict { what: format!("cashier {}", cashier.name) });
        }
        let id = table.allocate();
        cashier.id = Some(id);
        table.rows.insert(id, cashier.clone());
        Ok(cashier)
    }

    async fn update(&self, id: i64, cashier: Cashier) -> Result<Option<Cashier>, RepositoryError> {
        let mut table = self.table.lock().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if Self::name_taken(&table, &cashier.name, Some(id)) {
            return Err(RepositoryError::Conflict { what: format!("cashier {}", cashier.name) });
        }
        let existing = table.rows.get_mut(&id).map(|existing| {
            existing.name = cashier.name;
            existing.salary = cashier.salary;
            existing.clone()
        });
        Ok(existing)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.lock().await.rows.remove(&id).is_some())
    }
}

#[derive(Default)]
pub(crate) struct MemoryUserRepository {
    table: Mutex<Table<UserRecord>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        Ok(self.table.lock().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(self.table.lock().await.rows.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(self.table.lock().await.rows.values().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, username: &str, password_hash: &str, role: Role) -> Result<UserRecord, RepositoryError> {
        let mut table = self.table.lock().await;
        if table.rows.values().any(|u| u.username == username) {
            return Err(RepositoryError::Conflict { what: format!("user {username}") });
        }
        let record = UserRecord {
            id: table.allocate(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role,
        };
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.lock().await.rows.remove(&id).is_some())
    }
}

pub(crate) struct MemoryProbe;

#[async_trait]
impl DatabaseProbe for MemoryProbe {
    async fn check(&self) -> Result<DatabaseInfo, RepositoryError> {
        Ok(DatabaseInfo { catalog: "memory".to_string(), url: "memory://".to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Drink, ProductFields};

    #[tokio::test]
    async fn product_ids_are_not_reused() {
        let repo = MemoryProductRepository::<Drink>::new();
        let first = repo.insert(Drink::from_fields(ProductFields::new(Some(42), "Water", 1))).await.unwrap();
        assert_eq!(first.id, Some(1), "caller supplied id is ignored");
        assert!(repo.delete_by_id(1).await.unwrap());
        assert!(!repo.delete_by_id(1).await.unwrap());

        let second = repo.insert(Drink::from_fields(ProductFields::new(None, "Juice", 2))).await.unwrap();
        assert_eq!(second.id, Some(2));
        assert_eq!(repo.find_all().await.unwrap(), vec![second]);
    }

    #[tokio::test]
    async fn update_missing_product() {
        let repo = MemoryProductRepository::<Drink>::new();
        let updated = repo.update(9, Drink::from_fields(ProductFields::new(None, "Cola", 2))).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn cashier_names_are_unique() {
        let repo = MemoryCashierRepository::default();
        let ana = repo.insert(Cashier::new("Ana", Some(1200))).await.unwrap();
        let luis = repo.insert(Cashier::new("Luis", None)).await.unwrap();
        assert!(matches!(
            repo.insert(Cashier::new("Ana", None)).await,
            Err(RepositoryError::Conflict { .. })
        ));
        assert!(matches!(
            repo.update(luis.id.unwrap(), Cashier::new("Ana", None)).await,
            Err(RepositoryError::Conflict { .. })
        ));

        let renamed = repo.update(ana.id.unwrap(), Cashier::new("Ana Maria", Some(1300))).await.unwrap().unwrap();
        assert_eq!(renamed.id, ana.id);
        assert_eq!(repo.find_by_name("Ana Maria").await.unwrap(), Some(renamed));
    }

    #[tokio::test]
    async fn usernames_are_unique() {
        let repo = MemoryUserRepository::default();
        repo.insert("admin", "hash", Role::Admin).await.unwrap();
        assert!(repo.insert("admin", "other", Role::Cashier).await.is_err());
        assert_eq!(repo.find_by_username("admin").await.unwrap().unwrap().role, Role::Admin);
    }
}
