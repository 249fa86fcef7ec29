//! SQLite-backed key-value store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use super::traits::{KeyValueStorage, StorageScope};

/// SqliteStore manages the `key_values` table
#[derive(Clone)]
pub struct SqliteStore {
    pool: Arc<SqlitePool>,
}

impl SqliteStore {
    /// Connect to `url` (e.g. `sqlite:gift_budget.db`), creating the file if needed
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("Invalid database url {:?}", url))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database {:?}", url))?;

        info!("Opened SQLite store at {}", url);
        Self::from_pool(pool).await
    }

    #[cfg(test)]
    pub async fn open_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::from_pool(pool).await
    }

    /// Private in-memory database; one connection so every query sees the same data
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        Self::setup_schema(&pool).await?;
        Ok(Self { pool: Arc::new(pool) })
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS key_values (
                scope TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY (scope, key)
            );
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create key_values table")?;

        Ok(())
    }

    #[cfg(test)]
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Every key in `scope`, sorted
    #[cfg(test)]
    pub async fn list_keys(&self, scope: StorageScope) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT key FROM key_values WHERE scope = ? ORDER BY key")
            .bind(scope.as_str())
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.iter().map(|row| row.get("key")).collect())
    }
}

#[async_trait]
impl KeyValueStorage for SqliteStore {
    async fn get(&self, scope: StorageScope, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM key_values WHERE scope = ? AND key = ?")
            .bind(scope.as_str())
            .bind(key)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn set(&self, scope: StorageScope, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO key_values (scope, key, value) VALUES (?, ?, ?)")
            .bind(scope.as_str())
            .bind(key)
            .bind(value)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        scope: StorageScope,
        key: &str,
        expected: Option<&str>,
        new_value: &str,
    ) -> Result<bool> {
        // Each branch is a single statement, so SQLite applies it atomically
        let result = match expected {
            None => {
                sqlx::query("INSERT OR IGNORE INTO key_values (scope, key, value) VALUES (?, ?, ?)")
                    .bind(scope.as_str())
                    .bind(key)
                    .bind(new_value)
                    .execute(&*self.pool)
                    .await?
            }
            Some(current) => {
                sqlx::query("UPDATE key_values SET value = ? WHERE scope = ? AND key = ? AND value = ?")
                    .bind(new_value)
                    .bind(scope.as_str())
                    .bind(key)
                    .bind(current)
                    .execute(&*self.pool)
                    .await?
            }
        };
        Ok(result.rows_affected() == 1)
    }
}
