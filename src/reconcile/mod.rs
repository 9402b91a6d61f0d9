//! Startup reconciliation of the stored document against the default.
//!
//! Runs once, before the router is served. Top-level sections found in the
//! stored document replace the default's wholesale; `branding` alone is
//! merged field by field so branding fields added to the default later
//! still reach installations that saved an older document.

use serde_json::{Map, Value};

use crate::db::ConfigRepository;
use crate::errors::AppError;

const BRANDING: &str = "branding";

/// What reconciliation did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The store was empty; the default was written.
    Initialized,
    /// The stored document was merged over the default.
    Reconciled { added_branding_fields: Vec<String> },
    /// The stored row was unusable and the default replaced it.
    Replaced { reason: String },
}

/// `base` with every entry of `overlay` written over it.
///
/// Keys of `base` keep their position; keys only in `overlay` follow.
pub fn shallow_merge(base: &Map<String, Value>, overlay: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Merge a stored document over the default.
pub fn merge_documents(
    default: &Map<String, Value>,
    stored: &Map<String, Value>,
) -> Map<String, Value> {
    let mut merged = shallow_merge(default, stored);

    if let Some(Value::Object(default_branding)) = default.get(BRANDING) {
        let empty = Map::new();
        let stored_branding = match stored.get(BRANDING) {
            Some(Value::Object(branding)) => branding,
            _ => &empty,
        };
        merged.insert(
            BRANDING.to_string(),
            Value::Object(shallow_merge(default_branding, stored_branding)),
        );
    }

    merged
}

/// Branding fields the default has and the stored document lacks.
fn missing_branding_fields(default: &Map<String, Value>, stored: &Map<String, Value>) -> Vec<String> {
    let Some(Value::Object(default_branding)) = default.get(BRANDING) else {
        return Vec::new();
    };
    let stored_branding = stored.get(BRANDING).and_then(Value::as_object);
    default_branding
        .keys()
        .filter(|key| !stored_branding.is_some_and(|b| b.contains_key(*key)))
        .cloned()
        .collect()
}

/// Reconcile the store against `default` and write the result back.
pub async fn reconcile_store(
    repo: &ConfigRepository,
    default: &Value,
) -> Result<ReconcileOutcome, AppError> {
    let Value::Object(default_map) = default else {
        return Err(AppError::Internal(
            "Default site document must be a JSON object".to_string(),
        ));
    };

    let Some(raw) = repo.load_raw().await? else {
        repo.put_document(default).await?;
        tracing::info!("No site document stored, wrote the default");
        return Ok(ReconcileOutcome::Initialized);
    };

    let stored = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(stored)) => stored,
        Ok(other) => {
            return replace(repo, default, format!("stored document is a JSON {}", json_kind(&other)))
                .await;
        }
        Err(e) => {
            return replace(repo, default, format!("stored document is not valid JSON: {}", e)).await;
        }
    };

    let added_branding_fields = missing_branding_fields(default_map, &stored);
    let merged = Value::Object(merge_documents(default_map, &stored));
    repo.put_document(&merged).await?;

    if added_branding_fields.is_empty() {
        tracing::info!("Site document reconciled");
    } else {
        tracing::info!(
            fields = ?added_branding_fields,
            "Site document reconciled, added default branding fields"
        );
    }

    Ok(ReconcileOutcome::Reconciled {
        added_branding_fields,
    })
}

async fn replace(
    repo: &ConfigRepository,
    default: &Value,
    reason: String,
) -> Result<ReconcileOutcome, AppError> {
    tracing::warn!(%reason, "Discarding unusable site document, wrote the default");
    repo.put_document(default).await?;
    Ok(ReconcileOutcome::Replaced { reason })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
