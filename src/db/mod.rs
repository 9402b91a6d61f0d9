//! Document storage.
//!
//! The site document lives under a single key in a key-value table. The
//! backend is chosen once at boot; when the configured medium cannot be
//! opened the server keeps running on a non-durable in-memory store and
//! reports the degradation through the health endpoint.

mod memory;
mod postgres;
mod repository;
mod sqlite;

pub use memory::MemoryBackend;
pub use postgres::PostgresBackend;
pub use repository::*;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::Config;
use crate::errors::AppError;

/// DDL shared by the relational backends.
const CREATE_CONFIG_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS config (
        key TEXT PRIMARY KEY,
        value TEXT
    )
"#;

/// Which medium holds the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Sqlite,
    Postgres,
    Memory,
}

impl StoreKind {
    pub fn is_durable(self) -> bool {
        !matches!(self, StoreKind::Memory)
    }
}

/// Key-value persistence for JSON text.
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Insert or replace the value under `key`.
    async fn save(&self, key: &str, value: &str) -> Result<(), AppError>;

    fn kind(&self) -> StoreKind;
}

/// Outcome of opening the store at boot.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub backend: StoreKind,
    pub durable: bool,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl StoreStatus {
    pub fn healthy(kind: StoreKind) -> Self {
        Self {
            backend: kind,
            durable: kind.is_durable(),
            degraded: false,
            reason: None,
        }
    }

    pub fn fallback(reason: String) -> Self {
        Self {
            backend: StoreKind::Memory,
            durable: false,
            degraded: true,
            reason: Some(reason),
        }
    }
}

/// Open the configured backend, falling back to memory if it is unavailable.
pub async fn open_store(config: &Config) -> (Arc<dyn KeyValueBackend>, StoreStatus) {
    match connect(config).await {
        Ok(backend) => {
            let status = StoreStatus::healthy(backend.kind());
            tracing::info!(backend = ?status.backend, "Document store opened");
            (backend, status)
        }
        Err(e) => {
            let reason = e.message();
            tracing::error!(
                error = %reason,
                "Document store unavailable, falling back to in-memory storage. Edits will NOT survive a restart"
            );
            (Arc::new(MemoryBackend::new()), StoreStatus::fallback(reason))
        }
    }
}

async fn connect(config: &Config) -> Result<Arc<dyn KeyValueBackend>, AppError> {
    let Some(url) = config.database_url.as_deref() else {
        return Ok(Arc::new(SqliteBackend::open(&config.db_path).await?));
    };

    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Ok(Arc::new(PostgresBackend::connect(url).await?))
    } else if url.starts_with("sqlite:") {
        Ok(Arc::new(SqliteBackend::connect(url).await?))
    } else if url == "memory:" {
        Ok(Arc::new(MemoryBackend::new()))
    } else {
        Err(AppError::StorageUnavailable(
            "Unsupported SITE_DATABASE_URL scheme".to_string(),
        ))
    }
}
