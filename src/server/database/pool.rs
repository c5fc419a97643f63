use crate::server::database::connection::Connection;
use anyhow::{anyhow, Error};
use async_trait::async_trait;
use log::{error, info, warn};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time;
use tokio_postgres::{Client, NoTls};

/// A client the pool can hand out.
pub(crate) trait PoolClient: Send + 'static {
    /// a closed client is reopened before being handed out again
    fn is_closed(&self) -> bool;
}

impl PoolClient for Client {
    fn is_closed(&self) -> bool {
        Client::is_closed(self)
    }
}

/// Opens a fresh client, used to fill the pool and to replace closed clients.
#[async_trait]
pub(crate) trait Connector<C>: Send + Sync {
    async fn connect(&self) -> Result<C, Error>;
}

pub(crate) struct PgConnector {
    conn_str: String,
}

#[async_trait]
impl Connector<Client> for PgConnector {
    async fn connect(&self) -> Result<Client, Error> {
        let (client, conn) = tokio_postgres::connect(&self.conn_str, NoTls).await?;
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                error!("connection returned error and aborted, {}", e);
            }
        });
        Ok(client)
    }
}

pub(crate) struct CommonPool<C: PoolClient> {
    /// pool name
    pub name: String,
    /// idle clients, accessed in a FIFO manner
    pub clients: Mutex<VecDeque<C>>,
    /// one permit per idle client
    pub available: Arc<Semaphore>,
    pub acquire_timeout: Duration,
    pub connector: Arc<dyn Connector<C>>,
}

/// Fixed-size pool of database clients.
pub(crate) struct Pool<C: PoolClient>(pub(crate) Arc<CommonPool<C>>);

impl<C: PoolClient> Clone for Pool<C> {
    fn clone(&self) -> Pool<C> {
        Pool(self.0.clone())
    }
}

impl<C: PoolClient> Pool<C> {
    /// create a pool owning the given clients
    pub fn new(
        name: impl Into<String>,
        clients: Vec<C>,
        acquire_timeout: Duration,
        connector: Arc<dyn Connector<C>>,
    ) -> Self {
        let available = Arc::new(Semaphore::new(clients.len()));
        Self(Arc::new(CommonPool {
            name: name.into(),
            clients: Mutex::new(clients.into()),
            available,
            acquire_timeout,
            connector,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// acquire a connection, bail out if the timeout exceeds.
    pub async fn acquire(&self) -> Option<Connection<C>> {
        let sleep = time::sleep(self.0.acquire_timeout);
        tokio::pin!(sleep);
        let permit = tokio::select! {
            permit = self.0.available.clone().acquire_owned() => permit.ok()?,
            _ = &mut sleep => {
                error!("timed out to acquire a new connection from pool={} after {:?}", self.0.name, self.0.acquire_timeout);
                return None;
            },
        };
        let client = self.0.clients.lock().ok()?.pop_front();
        let Some(client) = client else {
            error!("pool={} granted a permit without an idle client", self.0.name);
            return None;
        };
        if !client.is_closed() {
            return Some(Connection::new(client, self.clone(), permit));
        }

        warn!("pool={} reopening a closed connection", self.0.name);
        match time::timeout(self.0.acquire_timeout, self.0.connector.connect()).await {
            Ok(Ok(fresh)) => Some(Connection::new(fresh, self.clone(), permit)),
            Ok(Err(e)) => {
                error!("pool={} failed to reconnect, {}", self.0.name, e);
                self.release(client);
                drop(permit);
                None
            }
            Err(_) => {
                error!("pool={} timed out reconnecting", self.0.name);
                self.release(client);
                drop(permit);
                None
            }
        }
    }

    pub(crate) fn release(&self, client: C) {
        match self.0.clients.lock() {
            Ok(mut clients) => clients.push_back(client),
            Err(e) => error!("pool={} lock poisoned, dropping client, {}", self.0.name, e),
        }
    }

    /// number of clients waiting to be acquired
    pub fn idle(&self) -> usize {
        self.0.available.available_permits()
    }
}

impl Pool<Client> {
    /// open `size` connections concurrently
    pub async fn connect(name: &str, conn_str: &str, size: usize, acquire_timeout: Duration) -> Result<Self, Error> {
        let connector = Arc::new(PgConnector { conn_str: conn_str.to_string() });
        let mut set = JoinSet::new();
        for _ in 0..size {
            let connector = connector.clone();
            set.spawn(async move { connector.connect().await });
        }
        let mut clients = Vec::with_capacity(size);
        while let Some(res) = set.join_next().await {
            match res {
                Ok(Ok(client)) => {
                    info!("connection created for pool={}", name);
                    clients.push(client);
                }
                Ok(Err(e)) => error!("failed to connect for pool={}, {}", name, e),
                Err(e) => error!("join_next failed when joining, {}", e),
            };
        }
        if clients.is_empty() {
            return Err(anyhow!("pool={} could not open any connection", name));
        }
        Ok(Self::new(name, clients, acquire_timeout, connector))
    }
}
