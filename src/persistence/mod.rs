//! Append-only request log backed by SQLite.
//!
//! One row per inbound request, keyed by a generated id. Insert-only:
//! there is no update or delete path, and rows survive process restarts.

pub mod error;

pub use error::PersistenceError;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Append-only log of inbound request text
#[async_trait]
pub trait RequestLog: Send + Sync {
    /// Record one inbound payload; returns the generated row id.
    async fn record(&self, text: &str) -> Result<String, PersistenceError>;
}

/// SQLite-backed request log.
///
/// The pool is opened once per process and shared across requests;
/// write serialization is the database's own.
pub struct SqliteRequestLog {
    pool: SqlitePool,
}

impl SqliteRequestLog {
    /// Open the database at `url` (creating it if missing) and ensure
    /// the log table exists.
    pub async fn connect(url: &str) -> Result<Self, PersistenceError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS request_log (
                id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Number of recorded rows
    pub async fn count(&self) -> Result<i64, PersistenceError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM request_log")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl RequestLog for SqliteRequestLog {
    async fn record(&self, text: &str) -> Result<String, PersistenceError> {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();

        sqlx::query("INSERT INTO request_log (id, content, created_at) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(text)
            .bind(&created_at)
            .execute(&self.pool)
            .await?;

        Ok(id)
    }
}
