//! Networked PostgreSQL backend, selected by a `postgres://` connection string.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;

use super::{KeyValueBackend, StoreKind, CREATE_CONFIG_TABLE};
use crate::errors::AppError;

pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(std::time::Duration::from_secs(10))
            .connect(url)
            .await
            .map_err(|e| {
                AppError::StorageUnavailable(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        sqlx::query(CREATE_CONFIG_TABLE)
            .execute(&pool)
            .await
            .map_err(|e| {
                AppError::StorageUnavailable(format!("Failed to prepare config table: {}", e))
            })?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl KeyValueBackend for PostgresBackend {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        let row = sqlx::query("SELECT value FROM config WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.get::<Option<String>, _>("value").unwrap_or_default()))
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO config (key, value) VALUES ($1, $2) ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Postgres
    }
}
