pub mod redis;
pub mod settings;

use core::fmt;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use self::redis::RedisStore;
pub use settings::Settings;

pub type StoreResult<T> = core::result::Result<T, StoreErr>;

#[derive(Debug, Error)]
pub enum StoreErr {
    #[error("redis client error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("error during deserialization: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable string-keyed value storage. Values survive process restarts; each
/// key is read and written independently, with no transaction across keys.
#[async_trait]
pub trait KvStore: Send + Sync + fmt::Debug {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> StoreResult<()>;
    async fn remove(&self, key: &str) -> StoreResult<()>;
}
