use core::fmt;
use std::sync::LazyLock;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::store::{KvStore, StoreResult};

const CANNOT_DEBUG: &str = "Debug called on ConnectionManager";

static REDIS_CONNECTION_POOL: LazyLock<OnceCell<RedisStore>> = LazyLock::new(OnceCell::new);

/// Retrieve a settings store handle backed by a static connection pool.
pub async fn redis_store(url: &str) -> StoreResult<&'static RedisStore> {
    REDIS_CONNECTION_POOL
        .get_or_try_init(|| async { RedisStore::new(url).await })
        .await
}

/// Redis-backed [`KvStore`]. Values are stored as JSON strings under their
/// setting key, so the popup/options flows and the poller see one flat keyspace.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", CANNOT_DEBUG)
    }
}

impl RedisStore {
    pub async fn new(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;

        Ok(Self { manager })
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let mut conn = self.manager.clone();

        let raw: Option<String> = conn.get(key).await?;
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        let mut conn = self.manager.clone();

        let raw = serde_json::to_string(&value)?;
        let _: () = conn.set(key, raw).await?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.del(key).await?;

        Ok(())
    }
}
