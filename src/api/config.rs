//! Site document endpoints.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;

use super::{Ack, ApiResult};
use crate::errors::AppError;
use crate::models::SiteDocument;
use crate::AppState;

/// GET /api/config - The stored document, as saved.
pub async fn get_config(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let document = state.repo.get_document().await?;
    Ok(Json(document))
}

/// POST /api/config - Replace the whole document.
///
/// The payload must describe a complete, valid site document. It is stored
/// verbatim; no merge with the previous value takes place.
pub async fn save_config(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Ack>> {
    let Json(document) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;

    let parsed = SiteDocument::from_value(&document)?;
    state.repo.put_document(&document).await?;

    tracing::info!(
        menu_items = parsed.menu.len(),
        testimonials = parsed.about.testimonials.len(),
        "Site document saved"
    );

    Ok(Json(Ack::ok()))
}
