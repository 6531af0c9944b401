//! SQLite warehouse store
//!
//! Embedded backend holding both the production contract tables and the
//! warehouse tables. Configured for a single writer:
//! - WAL mode so readers are not blocked during a build
//! - Foreign keys enforced (facts must reference existing dimension rows)
//! - Busy timeout as the only bound on lock waits
//!
//! All schema definitions and migrations are managed here.

pub mod error;
pub(crate) mod migrations;
pub mod repositories;
pub mod schema;

pub use error::SqliteError;
pub use sqlx::SqlitePool;

use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{ConnectOptions, Sqlite, Transaction};
use tracing::log::LevelFilter;

use crate::core::config::DatabaseConfig;

/// SQLite database service
///
/// Owns the connection pool. A warehouse build borrows exactly one
/// transaction from it via [`SqliteService::begin`].
pub struct SqliteService {
    pool: SqlitePool,
}

impl SqliteService {
    /// Initialize the database service
    ///
    /// Creates the database file (and its parent directory) if missing,
    /// configures pragmas, and runs any pending migrations.
    pub async fn init(config: &DatabaseConfig) -> Result<Self, SqliteError> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(config.busy_timeout_secs))
            .pragma("temp_store", "MEMORY")
            .log_statements(LevelFilter::Trace);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        migrations::run_migrations(&pool).await?;

        tracing::debug!(path = %config.path.display(), "SqliteService initialized");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a SqliteService from an existing pool (primarily for testing)
    #[cfg(test)]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Begin the transaction a warehouse build runs in
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, SqliteError> {
        Ok(self.pool.begin().await?)
    }

    /// Schema version recorded in the database
    pub async fn schema_version(&self) -> Result<Option<i32>, SqliteError> {
        migrations::current_version(&self.pool).await
    }

    /// Close the connection pool gracefully
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("SQLite pool closed");
    }
}

/// Single-connection in-memory pool with the full schema applied
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::query(schema::SCHEMA).execute(&pool).await.unwrap();
    pool
}
