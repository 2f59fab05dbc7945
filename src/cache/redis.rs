//! Redis Cache Backend
//!
//! [`CacheBackend`] over a multiplexed, auto-reconnecting Redis connection.
//! The connection is established on first use, so the service starts even
//! when Redis is down. Every command is bounded by the operation timeout.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::OnceCell;

use super::CacheBackend;
use crate::error::CacheError;

// == Redis Cache ==
/// Redis-backed cache shared by all requests.
pub struct RedisCache {
    client: Client,
    conn: OnceCell<ConnectionManager>,
    op_timeout: Duration,
}

impl RedisCache {
    /// Parses `redis_url`. No connection is made until the first command.
    pub fn open(redis_url: &str, op_timeout: Duration) -> Result<Self, CacheError> {
        Ok(Self {
            client: Client::open(redis_url)?,
            conn: OnceCell::new(),
            op_timeout,
        })
    }

    // Commands take `&mut`; the manager is a cheap handle onto one shared
    // multiplexed connection, so each call works on its own clone. A failed
    // first connect leaves the cell empty and is retried on the next call.
    async fn conn(&self) -> Result<ConnectionManager, CacheError> {
        self.conn
            .get_or_try_init(|| async {
                Ok::<_, CacheError>(self.client.get_connection_manager().await?)
            })
            .await
            .cloned()
    }

    /// Bounds a whole operation, from waiting on the connection cell through
    /// the command itself.
    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, CacheError>>,
    ) -> Result<T, CacheError> {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout(self.op_timeout)),
        }
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn ping(&self) -> Result<(), CacheError> {
        self.bounded(async {
            let mut conn = self.conn().await?;
            let _pong: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok::<_, CacheError>(())
        })
        .await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.bounded(async {
            let mut conn = self.conn().await?;
            let value: Option<String> = conn.get(key).await?;
            Ok::<_, CacheError>(value)
        })
        .await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let seconds = ttl.as_secs().max(1);
        self.bounded(async {
            let mut conn = self.conn().await?;
            let _: () = conn.set_ex(key, value, seconds).await?;
            Ok::<_, CacheError>(())
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        self.bounded(async {
            let mut conn = self.conn().await?;
            let removed: i64 = conn.del(key).await?;
            Ok::<_, CacheError>(removed > 0)
        })
        .await
    }

    async fn incr(&self, key: &str) -> Result<i64, CacheError> {
        self.bounded(async {
            let mut conn = self.conn().await?;
            let value: i64 = conn.incr(key, 1).await?;
            Ok::<_, CacheError>(value)
        })
        .await
    }

    async fn info(&self, section: &str) -> Result<String, CacheError> {
        self.bounded(async {
            let mut conn = self.conn().await?;
            let info: String = redis::cmd("INFO").arg(section).query_async(&mut conn).await?;
            Ok::<_, CacheError>(info)
        })
        .await
    }
}
