//! Site document repository.
//!
//! Parses and serializes the document on top of whichever backend was opened.

use std::sync::Arc;

use serde_json::Value;

use super::{KeyValueBackend, StoreKind};
use crate::errors::AppError;
use crate::models::SITE_CONFIG_KEY;

/// Read and replace the site document as a whole.
#[derive(Clone)]
pub struct ConfigRepository {
    backend: Arc<dyn KeyValueBackend>,
}

impl ConfigRepository {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    pub fn kind(&self) -> StoreKind {
        self.backend.kind()
    }

    /// The stored JSON text, unparsed.
    pub async fn load_raw(&self) -> Result<Option<String>, AppError> {
        self.backend.load(SITE_CONFIG_KEY).await
    }

    /// Get the stored document exactly as saved.
    pub async fn get_document(&self) -> Result<Value, AppError> {
        let raw = self
            .load_raw()
            .await?
            .ok_or_else(|| AppError::NotFound("Config not found".to_string()))?;

        serde_json::from_str(&raw)
            .map_err(|e| AppError::Internal(format!("Stored site document is not valid JSON: {}", e)))
    }

    /// Replace the stored document. Last writer wins.
    pub async fn put_document(&self, document: &Value) -> Result<(), AppError> {
        let raw = serde_json::to_string(document)?;
        self.backend.save(SITE_CONFIG_KEY, &raw).await
    }
}
