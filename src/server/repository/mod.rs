//! Persistence, one async trait per entity.
//!
//! `postgres` backs them with the read/write pools, `memory` keeps rows in process.

pub(crate) mod memory;
pub(crate) mod postgres;

use async_trait::async_trait;
use derive_more::{Display, Error};
use crate::model::{Cashier, MenuItem, Role, User};

#[derive(Debug, Display, Error)]
pub enum RepositoryError {
    #[display("database error: {source}")]
    Db { source: tokio_postgres::Error },
    #[display("no pooled connection available")]
    PoolExhausted,
    #[display("statement timed out")]
    Timeout,
    #[display("{what} already exists")]
    Conflict {
        #[error(not(source))]
        what: String,
    },
}

impl From<tokio_postgres::Error> for RepositoryError {
    fn from(source: tokio_postgres::Error) -> Self {
        if source.code() == Some(&tokio_postgres::error::SqlState::UNIQUE_VIOLATION) {
            return RepositoryError::Conflict { what: "row".to_string() };
        }
        RepositoryError::Db { source }
    }
}

impl RepositoryError {
    /// Give a unique violation the name of the row it hit.
    pub(crate) fn naming(self, what: impl FnOnce() -> String) -> Self {
        match self {
            RepositoryError::Conflict { .. } => RepositoryError::Conflict { what: what() },
            other => other,
        }
    }
}

/// Stored account, the hash never leaves the server.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

impl UserRecord {
    pub fn view(&self) -> User {
        User {
            id: Some(self.id),
            username: self.username.clone(),
            role: self.role,
        }
    }
}

#[async_trait]
pub trait ProductRepository<P: MenuItem>: Send + Sync {
    async fn find_all(&self) -> Result<Vec<P>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<P>, RepositoryError>;

    /// stores a new row, the id of `item` is ignored and a fresh one assigned
    async fn insert(&self, item: P) -> Result<P, RepositoryError>;

    /// replaces the row `id`, `None` when it does not exist
    async fn update(&self, id: i64, item: P) -> Result<Option<P>, RepositoryError>;

    /// false when nothing was deleted
    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait CashierRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Cashier>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Cashier>, RepositoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Cashier>, RepositoryError>;

    async fn insert(&self, cashier: Cashier) -> Result<Cashier, RepositoryError>;

    /// replaces name and salary only
    async fn update(&self, id: i64, cashier: Cashier) -> Result<Option<Cashier>, RepositoryError>;

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<UserRecord>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserRecord>, RepositoryError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, RepositoryError>;

    async fn insert(&self, username: &str, password_hash: &str, role: Role) -> Result<UserRecord, RepositoryError>;

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepositoryError>;
}

/// What the database check reports when the store is reachable.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseInfo {
    pub catalog: String,
    pub url: String,
}

#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn check(&self) -> Result<DatabaseInfo, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_is_named_after_the_row() {
        let named = RepositoryError::Conflict { what: "row".to_string() }.naming(|| "cashier Ana".to_string());
        assert_eq!(named.to_string(), "cashier Ana already exists");

        let untouched = RepositoryError::Timeout.naming(|| "cashier Ana".to_string());
        assert!(matches!(untouched, RepositoryError::Timeout));
    }
}
