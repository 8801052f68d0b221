//! Redis correlation store

use crate::domain::correlation::{CorrelationStore, StoreError};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// Correlation store on a shared Redis instance. Plain GET/SET, no
/// transactions; expiry is whatever the instance is configured with.
#[derive(Clone)]
pub struct RedisCorrelationStore {
    conn: ConnectionManager,
    timeout: Duration,
}

impl RedisCorrelationStore {
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::open(url).map_err(backend)?;
        let conn = with_timeout(timeout, ConnectionManager::new(client)).await?;
        info!("Connected to correlation store at {}", url);
        Ok(Self { conn, timeout })
    }
}

#[async_trait]
impl CorrelationStore for RedisCorrelationStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.conn.clone();
        with_timeout(self.timeout, conn.get::<_, Option<String>>(key)).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        with_timeout(self.timeout, conn.set::<_, _, ()>(key, value)).await
    }
}

async fn with_timeout<T>(
    timeout: Duration,
    fut: impl Future<Output = Result<T, RedisError>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(backend),
        Err(_) => Err(StoreError::Timeout(timeout)),
    }
}

fn backend(e: RedisError) -> StoreError {
    StoreError::Backend(e.to_string())
}
