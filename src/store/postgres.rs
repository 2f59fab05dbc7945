//! PostgreSQL Entry Store
//!
//! sqlx-backed implementation of [`EntryStore`]. Every call is bounded by the
//! configured operation timeout.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use super::EntryStore;
use crate::error::StoreError;
use crate::models::Entry;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS entries (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    message TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

// == PostgreSQL Store ==
/// Entry store backed by a shared PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgEntryStore {
    pool: PgPool,
    op_timeout: Duration,
}

impl PgEntryStore {
    /// Wraps an existing pool.
    pub fn new(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    /// Opens a pool against `database_url`.
    ///
    /// Connection acquisition shares the operation timeout so that a dead
    /// server cannot stall a request on the pool.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        op_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(op_timeout)
            .connect(database_url)
            .await?;

        Ok(Self::new(pool, op_timeout))
    }

    /// Creates the `entries` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.bounded(sqlx::query(CREATE_TABLE_SQL).execute(&self.pool))
            .await?;
        info!("Database schema ready");
        Ok(())
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.op_timeout)),
        }
    }
}

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.bounded(sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map(|_| ())
    }

    async fn insert_entry(
        &self,
        name: &str,
        message: &str,
    ) -> Result<(i32, DateTime<Utc>), StoreError> {
        let query = sqlx::query_as::<_, (i32, DateTime<Utc>)>(
            "INSERT INTO entries (name, message) VALUES ($1, $2) RETURNING id, created_at",
        )
        .bind(name)
        .bind(message);

        self.bounded(query.fetch_one(&self.pool)).await
    }

    async fn list_entries(&self) -> Result<Vec<Entry>, StoreError> {
        let query = sqlx::query_as::<_, Entry>(
            "SELECT id, name, message, created_at FROM entries ORDER BY id ASC",
        );

        self.bounded(query.fetch_all(&self.pool)).await
    }

    async fn count_entries(&self) -> Result<i64, StoreError> {
        let query = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM entries");

        self.bounded(query.fetch_one(&self.pool)).await
    }
}
