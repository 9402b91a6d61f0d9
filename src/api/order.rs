//! Order link endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::Local;

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{restaurant_number, whatsapp_link, OrderLink, OrderRequest};
use crate::AppState;

/// POST /api/order-link - Build the prefilled WhatsApp link for an order.
pub async fn order_link(
    State(state): State<AppState>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> ApiResult<Json<OrderLink>> {
    let Json(request) = payload.map_err(|e| AppError::MalformedPayload(e.body_text()))?;
    request.validate()?;

    let document = state.repo.get_document().await?;
    let number = restaurant_number(&document).ok_or_else(|| {
        AppError::NotFound("The site document has no WhatsApp number".to_string())
    })?;

    let message = request.message(&Local::now().format("%H:%M:%S").to_string());
    let url = whatsapp_link(&number, &message);

    Ok(Json(OrderLink { url, message }))
}
