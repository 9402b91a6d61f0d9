//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod config;
mod health;
mod order;

pub use config::*;
pub use health::*;
pub use order::*;

use serde::Serialize;

use crate::errors::AppError;

/// Handler result; errors render as the shared error envelope.
pub type ApiResult<T> = Result<T, AppError>;

/// Bare acknowledgment for writes, with no echo of the stored value.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Fallback for unknown `/api` paths, so they never reach the page bundle.
pub async fn api_not_found() -> AppError {
    AppError::NotFound("No such API endpoint".to_string())
}
