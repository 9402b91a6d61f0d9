//! Embedded SQLite backend, the default deployment.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use super::{KeyValueBackend, StoreKind, CREATE_CONFIG_TABLE};
use crate::errors::AppError;

pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Open (creating if needed) the database file at `db_path`.
    pub async fn open(db_path: &Path) -> Result<Self, AppError> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::StorageUnavailable(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        Self::connect(&format!("sqlite:{}?mode=rwc", db_path.display())).await
    }

    /// Open a database from a `sqlite:` connection string.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(unavailable)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(unavailable)?;

        sqlx::query(CREATE_CONFIG_TABLE)
            .execute(&pool)
            .await
            .map_err(unavailable)?;

        Ok(Self { pool })
    }
}

fn unavailable(err: sqlx::Error) -> AppError {
    AppError::StorageUnavailable(format!("Failed to open SQLite database: {}", err))
}

#[async_trait]
impl KeyValueBackend for SqliteBackend {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT value FROM config WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get::<Option<String>, _>("value").unwrap_or_default()))
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO config (key, value) VALUES (?, ?) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Sqlite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let backend = SqliteBackend::open(&temp_dir.path().join("test.sqlite"))
            .await
            .unwrap();

        assert!(backend.load("site_config").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let backend = SqliteBackend::open(&temp_dir.path().join("test.sqlite"))
            .await
            .unwrap();

        backend.save("site_config", r#"{"a":1}"#).await.unwrap();
        backend.save("site_config", r#"{"b":2}"#).await.unwrap();

        assert_eq!(
            backend.load("site_config").await.unwrap().as_deref(),
            Some(r#"{"b":2}"#)
        );
    }

    #[tokio::test]
    async fn test_unusable_parent_directory_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = match SqliteBackend::open(&blocker.join("site.sqlite")).await {
            Ok(_) => panic!("opened a database under a regular file"),
            Err(e) => e,
        };

        assert_eq!(err.error_code(), "STORAGE_UNAVAILABLE");
        assert!(err.message().contains("Failed to create database directory"));
    }

    #[tokio::test]
    async fn test_value_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.sqlite");

        {
            let backend = SqliteBackend::open(&db_path).await.unwrap();
            backend.save("site_config", "{}").await.unwrap();
            backend.pool.close().await;
        }

        let backend = SqliteBackend::open(&db_path).await.unwrap();
        assert_eq!(
            backend.load("site_config").await.unwrap().as_deref(),
            Some("{}")
        );
    }
}
