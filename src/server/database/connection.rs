use std::ops::Deref;
use log::warn;
use tokio::sync::OwnedSemaphorePermit;
use crate::server::database::pool::{Pool, PoolClient};

/// A client checked out of a [`Pool`], returned on drop.
pub(crate) struct Connection<C: PoolClient> {
    client: Option<C>,
    pool: Pool<C>,
    permit: Option<OwnedSemaphorePermit>,
}

impl<C: PoolClient> Connection<C> {
    pub fn new(client: C, pool: Pool<C>, permit: OwnedSemaphorePermit) -> Self {
        Self { client: Some(client), pool, permit: Some(permit) }
    }
}

impl<C: PoolClient> Deref for Connection<C> {
    type Target = C;

    fn deref(&self) -> &Self::Target {
        // only taken in drop
        self.client.as_ref().unwrap()
    }
}

impl<C: PoolClient> Drop for Connection<C> {
    fn drop(&mut self) {
        let Some(client) = self.client.take() else { return };
        if client.is_closed() {
            warn!("closed connection returned to pool={}, reopened on next acquire", self.pool.name());
        }
        self.pool.release(client);
        // permit is released after the client is back in the queue
        self.permit.take();
    }
}
